pub mod analyze;
pub mod class;
pub mod init;
pub mod validate;

/// How report commands print their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
