//! subpack-cli - Command-line interface for subpack
//!
//! Compresses and decompresses files with the dictionary-substitution or
//! the static Huffman codec, and dumps the tables of compressed files.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use subpack::huffman::{code_to_string, BitReader};
use subpack::package::strip_self_extracting;
use subpack::{
    compress_bytes, compression_stats, decompress_bytes, CompressOptions, CompressionLevel,
    DictionaryHeader, DictionaryOptions, HuffmanHeader, Method,
};

/// Inputs above this size get a progress bar
const PROGRESS_THRESHOLD: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "subpack-cli")]
#[command(about = "A CLI tool for dictionary-substitution and Huffman compression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress (stdin if omitted)
        input: Option<PathBuf>,

        /// Output compressed file (stdout if omitted)
        output: Option<PathBuf>,

        /// Method: `d` (dictionary) or `h` (Huffman)
        #[arg(short, long, default_value = "d", value_parser = parse_method)]
        method: Method,

        /// Dictionary level, 1 (fewest candidates) to 5 (most)
        #[arg(
            short,
            long,
            default_value_t = 5,
            value_parser = clap::value_parser!(u8).range(1..=5)
        )]
        level: u8,

        /// Emit a self-extracting package
        #[arg(long)]
        sfx: bool,

        /// Decompression stub appended to a self-extracting package
        #[arg(long, requires = "sfx")]
        stub: Option<PathBuf>,

        /// Maximum number of replacement symbols
        #[arg(long)]
        max_symbols: Option<usize>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file
    Decompress {
        /// Input compressed file (stdin if omitted)
        input: Option<PathBuf>,

        /// Output decompressed file (stdout if omitted)
        output: Option<PathBuf>,

        /// Method the file was compressed with: `d` or `h`
        #[arg(short, long, default_value = "d", value_parser = parse_method)]
        method: Method,

        /// Input is a self-extracting package
        #[arg(long)]
        sfx: bool,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the header and table of a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,

        /// Method the file was compressed with: `d` or `h`
        #[arg(short, long, default_value = "d", value_parser = parse_method)]
        method: Method,

        /// Input is a self-extracting package
        #[arg(long)]
        sfx: bool,
    },
}

fn parse_method(value: &str) -> Result<Method, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Method::from_char(c).map_err(|e| e.to_string()),
        _ => match value {
            "dictionary" => Ok(Method::Dictionary),
            "huffman" => Ok(Method::Huffman),
            _ => Err(format!("unknown method '{value}', expected d or h")),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A logger may already be installed when embedded; keep going without ours
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            method,
            level,
            sfx,
            stub,
            max_symbols,
            force,
        } => build_options(method, level, sfx, stub.as_deref(), max_symbols).and_then(|options| {
            compress_file(
                input.as_deref(),
                output.as_deref(),
                &options,
                force,
                cli.verbose,
                cli.quiet,
            )
        }),
        Commands::Decompress {
            input,
            output,
            method,
            sfx,
            force,
        } => decompress_file(
            input.as_deref(),
            output.as_deref(),
            method,
            sfx,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input, method, sfx } => show_file_info(&input, method, sfx, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_options(
    method: Method,
    level: u8,
    sfx: bool,
    stub: Option<&Path>,
    max_symbols: Option<usize>,
) -> Result<CompressOptions, Box<dyn std::error::Error>> {
    let mut dictionary = DictionaryOptions::new()
        .with_level(CompressionLevel::from_u8(level)?)
        .with_self_extracting(sfx);
    if let Some(limit) = max_symbols {
        dictionary = dictionary.with_max_symbols(limit);
    }

    let mut options = CompressOptions::new(method).with_dictionary(dictionary);
    if let Some(path) = stub {
        options = options.with_stub(fs::read(path)?);
    }
    Ok(options)
}

fn check_paths(
    input: Option<&Path>,
    output: Option<&Path>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(input) = input.filter(|path| !path.exists()) {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if let Some(output) = output.filter(|path| path.exists() && !force) {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn describe(path: Option<&Path>, stream: &str) -> String {
    path.map_or_else(|| stream.to_string(), |path| path.display().to_string())
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

fn progress_bar(size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || size <= PROGRESS_THRESHOLD {
        return None;
    }

    let pb = ProgressBar::new(2);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    pb.inc(1);
    Some(pb)
}

fn compress_file(
    input: Option<&Path>,
    output: Option<&Path>,
    options: &CompressOptions,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    // Reports would corrupt compressed data written to stdout
    let quiet = quiet || output.is_none();
    let verbose = verbose && output.is_some();

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            describe(input, "<stdin>"),
            describe(output, "<stdout>")
        );
        println!(
            "Method: {:?}, Level: {:?}, Self-extracting: {}",
            options.method, options.dictionary.level, options.dictionary.self_extracting
        );
    }

    let start_time = Instant::now();
    let input_data = read_input(input)?;
    debug!(
        "read {} bytes from {}",
        input_data.len(),
        describe(input, "<stdin>")
    );

    let progress = progress_bar(input_data.len(), quiet, "Compressing...");

    let compressed_data =
        compress_bytes(&input_data, options).map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    write_output(output, &compressed_data)?;

    let stats = compression_stats(
        input_data.len(),
        &compressed_data,
        options.method,
        options.dictionary.self_extracting,
    )?;

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:   {} bytes", stats.input_bytes);
        println!("  Output:  {} bytes", stats.output_bytes);
        println!("  Entries: {}", stats.table_entries);
        println!("  Ratio:   {:.1}%", stats.compression_ratio * 100.0);
        println!("  Time:    {:.2?}", start_time.elapsed());

        if stats.output_bytes > stats.input_bytes {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: Option<&Path>,
    output: Option<&Path>,
    method: Method,
    sfx: bool,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    let quiet = quiet || output.is_none();
    let verbose = verbose && output.is_some();

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            describe(input, "<stdin>"),
            describe(output, "<stdout>")
        );
    }

    let start_time = Instant::now();
    let compressed_data = read_input(input)?;
    let progress = progress_bar(compressed_data.len(), quiet, "Decompressing...");

    let decompressed_data = decompress_bytes(&compressed_data, method, sfx)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    write_output(output, &decompressed_data)?;

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", compressed_data.len());
        println!("  Output: {} bytes", decompressed_data.len());
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn show_file_info(
    input: &Path,
    method: Method,
    sfx: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    println!("Subpack File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());

    match method {
        Method::Dictionary => {
            let body = if sfx {
                strip_self_extracting(&data)?
            } else {
                &data[..]
            };
            let header = DictionaryHeader::parse(body)?;
            println!("  Method: dictionary substitution");
            println!("  Entries: {}", header.entries.len());
            println!("  Payload: {} bytes", header.payload_length);
            for entry in &header.entries {
                println!(
                    "    0x{:02X} <- \"{}\"",
                    entry.symbol,
                    entry.sequence.escape_ascii()
                );
            }
            if sfx {
                let body_end = header.header_length + header.payload_length + 1;
                let stub_len = body.len().saturating_sub(body_end);
                println!("  Stub: {} bytes", stub_len);
            }
        }
        Method::Huffman => {
            let header = HuffmanHeader::parse(&data)?;
            println!("  Method: static Huffman");
            println!("  Entries: {}", header.entries.len());
            println!("  Packed: {} bytes ({} pad bits)", header.packed_length, header.pad_length);

            // Codes are the preamble of the bit stream, in table order
            let mut reader = BitReader::new(header.packed(&data)?, header.pad_length)?;
            for &(symbol, code_length) in &header.entries {
                let code = reader.read_bits(code_length as usize)?;
                println!(
                    "    0x{:02X} '{}' -> {}",
                    symbol,
                    [symbol].escape_ascii(),
                    code_to_string(&code)
                );
            }
        }
    }

    match decompress_bytes(&data, method, sfx) {
        Ok(decompressed) => {
            println!("  Decompressed Size: {} bytes", decompressed.len());
            println!("  Status: ✓ Valid subpack file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted subpack file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
