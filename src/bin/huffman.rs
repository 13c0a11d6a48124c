use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use huffman_text::huffman::{decode_stream, HuffmanCoder, MergeStrategy};

#[derive(Parser, Debug)]
#[command(about = "Encode a file with a static Huffman code, or decode an encoded file")]
struct Args {
    /// Decode the input instead of encoding it
    #[arg(short, long = "decode", default_value_t = false)]
    decode: bool,
    /// The file to read
    input: PathBuf,
    /// The file to write, encoded.txt or decoded.txt when omitted
    output: Option<PathBuf>,
    /// Print the code table and coding statistics
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Merge tree nodes through a binary heap instead of a sorted list
    #[arg(long = "heap", default_value_t = false)]
    heap: bool,
}

fn run(args: &Args) -> huffman_text::Result<()> {
    let input = fs::read(&args.input)?;

    if args.decode {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("decoded.txt"));
        let decoded = decode_stream(&input)?;
        fs::write(&output, &decoded)?;
        if args.verbose {
            println!("decoded {} symbols into {}", decoded.len(), output.display());
        }
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("encoded.txt"));
    let strategy = if args.heap {
        MergeStrategy::MinHeap
    } else {
        MergeStrategy::SortedList
    };
    let encoded = HuffmanCoder::new().with_strategy(strategy).encode(&input)?;
    encoded.write_to(fs::File::create(&output)?)?;

    if args.verbose {
        let stats = encoded.stats();
        print!("{}", encoded.table);
        println!();
        println!(
            "{} symbols, {} distinct, {} bits ({:.3} bits/symbol, entropy {:.3})",
            stats.symbols,
            stats.distinct,
            stats.payload_bits,
            stats.bits_per_symbol,
            encoded.table.entropy()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error ({}): {}: {}", e.phase(), args.input.display(), e);
            ExitCode::FAILURE
        }
    }
}
