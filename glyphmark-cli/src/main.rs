use anyhow::Result;
use clap::{Parser, Subcommand};
use glyphmark_cli::{commands, OutputFormat};
use glyphmark_core::derive::DerivationParams;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "glyphmark")]
#[command(about = "Glyphmark - Invisible text watermarks from confusable characters", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a 40-bit watermark into a UTF-8 text file
    Embed {
        /// Input text file
        #[arg(short, long)]
        input: String,

        /// Watermark as up to 10 hex digits
        #[arg(short, long)]
        watermark: String,

        /// Output file (defaults to <input>-watermarked.<ext>)
        #[arg(short, long)]
        output: Option<String>,

        /// Refuse watermarks whose first or last bit is set
        #[arg(long)]
        strict: bool,
    },

    /// Recover the watermark from a text file
    Extract {
        /// Input file to read, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Derive a watermark from content with Argon2id
    Derive {
        /// File whose content is being watermarked
        #[arg(long)]
        blob: String,

        /// Salt as hex (at least 8 bytes)
        #[arg(long, conflicts_with_all = ["creator_id", "license"])]
        salt: Option<String>,

        /// Creator identifier (at least 8 bytes)
        #[arg(long, requires = "license")]
        creator_id: Option<String>,

        /// File holding the license text
        #[arg(long, requires = "creator_id")]
        license: Option<String>,

        /// Argon2 memory cost in KiB
        #[arg(long, default_value_t = DerivationParams::default().memory_kib)]
        memory_kib: u32,

        /// Argon2 passes
        #[arg(long, default_value_t = DerivationParams::default().iterations)]
        iterations: u32,

        /// Argon2 lanes
        #[arg(long, default_value_t = DerivationParams::default().parallelism)]
        parallelism: u32,
    },

    /// Derive the 128-byte contract id of a blob with Argon2id
    ContractId {
        /// File whose content is under contract
        #[arg(long)]
        blob: String,

        /// Watermark hash as hex (at least 8 bytes)
        #[arg(long, conflicts_with_all = ["creator_id", "license"])]
        watermark: Option<String>,

        /// Creator identifier (at least 8 bytes)
        #[arg(long, requires = "license")]
        creator_id: Option<String>,

        /// File holding the license text
        #[arg(long, requires = "creator_id")]
        license: Option<String>,

        /// Argon2 memory cost in KiB
        #[arg(long, default_value_t = DerivationParams::default().memory_kib)]
        memory_kib: u32,

        /// Argon2 passes
        #[arg(long, default_value_t = DerivationParams::default().iterations)]
        iterations: u32,

        /// Argon2 lanes
        #[arg(long, default_value_t = DerivationParams::default().parallelism)]
        parallelism: u32,
    },

    /// Report how many watermark bits a text file can carry
    Inspect {
        /// Input file to read, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Embed {
            input,
            watermark,
            output,
            strict,
        } => commands::embed::execute(&input, &watermark, output.as_deref(), strict),

        Commands::Extract { input, format } => commands::extract::execute(&input, format),

        Commands::Derive {
            blob,
            salt,
            creator_id,
            license,
            memory_kib,
            iterations,
            parallelism,
        } => commands::derive::execute(
            &blob,
            salt.as_deref(),
            creator_id.as_deref(),
            license.as_deref(),
            DerivationParams::new(memory_kib, iterations, parallelism),
        ),

        Commands::ContractId {
            blob,
            watermark,
            creator_id,
            license,
            memory_kib,
            iterations,
            parallelism,
        } => commands::contract::execute(
            &blob,
            watermark.as_deref(),
            creator_id.as_deref(),
            license.as_deref(),
            DerivationParams::new(memory_kib, iterations, parallelism),
        ),

        Commands::Inspect { input, format } => commands::inspect::execute(&input, format),
    }
}
