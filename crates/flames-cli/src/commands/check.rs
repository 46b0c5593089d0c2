use flames_core::stage::expected_quiz_len;
use flames_core::{load_documents, AssetSource, Documents};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckSummary {
    source: String,
    recipient: String,
    cute_pool: usize,
    memory_pool: usize,
    sample_cute: usize,
    sample_memory: usize,
    shuffle_final_order: bool,
    quiz_length: usize,
    issues: Vec<String>,
}

impl CheckSummary {
    fn new(source: &AssetSource, docs: &Documents) -> Self {
        Self {
            source: source.to_string(),
            recipient: docs.config.names.recipient(),
            cute_pool: docs.bank.cute.len(),
            memory_pool: docs.bank.memory.len(),
            sample_cute: docs.config.sample.cute,
            sample_memory: docs.config.sample.memory,
            shuffle_final_order: docs.config.shuffle_final_order,
            quiz_length: expected_quiz_len(&docs.bank, &docs.config),
            issues: docs.bank.validate().iter().map(ToString::to_string).collect(),
        }
    }
}

pub async fn run(
    source: AssetSource,
    strict: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let docs = load_documents(&source).await?;
    let summary = CheckSummary::new(&source, &docs);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("source:     {}", summary.source);
        println!("recipient:  {}", summary.recipient);
        println!(
            "pools:      cute {} / memory {}",
            summary.cute_pool, summary.memory_pool
        );
        println!(
            "sample:     cute {} / memory {} (final shuffle: {})",
            summary.sample_cute, summary.sample_memory, summary.shuffle_final_order
        );
        println!("quiz:       {} question(s)", summary.quiz_length);
        for issue in &summary.issues {
            println!("warning:    {issue}");
        }
    }

    if strict {
        docs.bank.ensure_valid()?;
    }
    Ok(())
}
