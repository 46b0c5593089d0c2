use flames_core::{build_quiz, load_documents, AssetSource, Sampler};

pub async fn run(
    source: AssetSource,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let docs = load_documents(&source).await?;
    let mut sampler = Sampler::new(seed);
    let session = build_quiz(&docs.bank, &docs.config, &mut sampler);
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
