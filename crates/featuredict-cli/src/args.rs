use clap::{ArgAction, Args, Parser, Subcommand};
use featuredict_core::GeometryType;
use std::path::PathBuf;

/// CLI arguments for featuredict
#[derive(Debug, Parser)]
#[command(
    name = "featuredict",
    version,
    about = "Find OpenStreetMap presets by tags, search term or id"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print matches as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the presets come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Directory with presets.json and translation files such as de.json
    #[arg(short, long, global = true, default_value = "presets")]
    pub presets: PathBuf,

    /// Directory with brand presets (presets.json, presets-DE.json, ...)
    #[arg(short, long, global = true)]
    pub brands: Option<PathBuf>,

    /// Dictionary configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options shared by the queries.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Locale of the results, repeatable, most preferred first (e.g. -l de-AT -l de)
    #[arg(short, long = "locale", global = true)]
    pub locales: Vec<String>,

    /// Do not fall back to unlocalized presets when locales are given
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// ISO 3166-1 or 3166-2 code of where the element is (e.g. DE, US-NY)
    #[arg(short, long, global = true)]
    pub country: Option<String>,

    /// Geometry of the element: point, vertex, line, area or relation
    #[arg(short, long, global = true)]
    pub geometry: Option<GeometryType>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the presets describing a set of tags
    Tags {
        /// Tags as key=value (e.g. shop=bakery name=Ditsch)
        #[arg(required = true, value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Only brands (true) or no brands (false)
        #[arg(long)]
        brand: Option<bool>,
    },

    /// Find presets whose name or terms start with a search term
    Term {
        /// Search term (e.g. "Bäck")
        term: String,

        /// Maximum number of results, 0 for all (default: from the configuration)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Only brands (true) or no brands (false)
        #[arg(long)]
        brand: Option<bool>,

        /// Also match tag values, e.g. "bakery" for shop=bakery
        #[arg(long)]
        tag_values: bool,
    },

    /// Look up a preset by its id
    Id {
        /// Preset id (e.g. shop/bakery)
        id: String,
    },

    /// Show a summary of the presets visible for the given locales
    Stats,

    /// Download presets.json and translation files into the presets directory
    #[cfg(feature = "fetch")]
    Fetch {
        /// Base URL of the iD tagging schema distribution
        #[arg(long, default_value = featuredict_core::loader::fetch::PRESETS_BASE_URL)]
        url: String,
    },
}

/// Parse `key=value`.
fn parse_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_owned(), value.trim().to_owned())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_global_options() {
        let args = CliArgs::try_parse_from([
            "featuredict",
            "tags",
            "shop=bakery",
            "name=Ditsch",
            "--country",
            "DE",
            "-l",
            "de",
            "-g",
            "area",
        ])
        .unwrap();
        match args.command {
            Commands::Tags { tags, brand } => {
                assert_eq!(
                    tags,
                    vec![
                        ("shop".to_string(), "bakery".to_string()),
                        ("name".to_string(), "Ditsch".to_string())
                    ]
                );
                assert_eq!(brand, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.filter.country.as_deref(), Some("DE"));
        assert_eq!(args.filter.locales, vec!["de".to_string()]);
        assert_eq!(args.filter.geometry, Some(GeometryType::Area));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!(CliArgs::try_parse_from(["featuredict", "tags", "shop"]).is_err());
        assert!(CliArgs::try_parse_from(["featuredict", "tags", "=bakery"]).is_err());
        assert!(CliArgs::try_parse_from(["featuredict", "tags"]).is_err());
    }

    #[test]
    fn parses_term_options() {
        let args = CliArgs::try_parse_from(["featuredict", "-vv", "term", "Bäck", "-n", "5", "--tag-values"]).unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Term {
                term, limit, tag_values, ..
            } => {
                assert_eq!(term, "Bäck");
                assert_eq!(limit, Some(5));
                assert!(tag_values);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
