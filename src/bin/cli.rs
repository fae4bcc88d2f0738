use clap::Parser;
use epg_grabber::grabber::{run, GrabberConfig, Locale, Options};

#[derive(Parser)]
struct Opt {
    /// EIT section dump file(s), sections stored back-to-back
    #[clap(required = true)]
    inputs: Vec<std::path::PathBuf>,

    /// ISO 3166 alpha-3 country code driving the text heuristics
    #[clap(long, default_value = "")]
    country: String,

    /// Resolve services by SID alone instead of the full ONID/TSID/SID triple
    #[clap(long, default_value_t = false)]
    match_by_sid: bool,

    /// Discard sections for services not already in the registry
    #[clap(long, default_value_t = false)]
    discard_unknown: bool,

    /// Keep matched season/episode text in the descriptions
    #[clap(long, default_value_t = false)]
    preserve_text: bool,

    /// Refine the category with the content sub-type nibble
    #[clap(long, default_value_t = false)]
    subtype_category: bool,

    /// Use the short description as the category
    #[clap(long, default_value_t = false)]
    description_category: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = Opt::parse();
    let report = run(Options {
        inputs: opt.inputs,
        config: GrabberConfig {
            locale: Locale::from_code(&opt.country),
            match_by_sid_only: opt.match_by_sid,
            create_missing_services: !opt.discard_unknown,
            preserve_matched_text: opt.preserve_text,
            use_content_subtype_for_category: opt.subtype_category,
            use_description_as_category: opt.description_category,
        },
        abandon: None,
    })
    .await?;

    println!("{report}");
    Ok(())
}
