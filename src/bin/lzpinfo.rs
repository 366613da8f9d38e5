//! LZP inspector.

use std::fs;
use std::path::{Path,PathBuf};
use clap::{Parser,Subcommand};
use lzp::{DecodeOptions,FrameSizePolicy,LzpFile,LzpResult};

#[derive(Parser, Debug)]
#[command(name = "lzpinfo", version, about = "Inspect and unpack LZP animations")]
struct Cli {
    /// What to do with frames that are not width * height pixels:
    /// tolerate, strict or fit.
    #[arg(long, value_name = "POLICY", default_value = "tolerate", global = true)]
    frame_size: FrameSizePolicy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dimensions and frame table of each file.
    List {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the palette and the pixels of every frame.
    Debug {
        file: PathBuf,
    },

    /// Write every decoded frame to a .bin file.
    Dump {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = DecodeOptions::default().with_frame_size(cli.frame_size);

    match cli.command {
        Command::List { files } => {
            for file in files {
                report(&file, list(&file, options));
            }
        },
        Command::Debug { file } => {
            report(&file, debug(&file, options));
        },
        Command::Dump { files, out } => {
            for file in files {
                report(&file, dump(&file, &out, options));
            }
        },
    }
}

/// Report a failure against the file name, without stopping the batch.
fn report(file: &Path, res: LzpResult<()>) {
    if let Err(e) = res {
        println!("{} : {}", file.display(), e);
    }
}

fn open(file: &Path, options: DecodeOptions)
        -> LzpResult<LzpFile> {
    let mut lzp = LzpFile::open(file)?;
    lzp.set_options(options);
    Ok(lzp)
}

fn list(file: &Path, options: DecodeOptions)
        -> LzpResult<()> {
    let mut lzp = open(file, options)?;

    println!("{}", file.display());
    println!("{}x{}, {}fps, {} frames.",
            lzp.width(), lzp.height(), lzp.frame_rate(), lzp.frame_count());

    for n in 0..(lzp.frame_count() as usize) {
        let offset = lzp.frame_offsets()[n];
        let pixels = lzp.decode_frame(n)?;
        println!("Frame: {:3}, Offset: 0x{:08x}, Packed length: {} bytes",
                n, offset, pixels.len());
    }

    Ok(())
}

fn debug(file: &Path, options: DecodeOptions)
        -> LzpResult<()> {
    let mut lzp = open(file, options)?;

    for (n, c) in lzp.palette().iter().enumerate() {
        println!("0x{:02x} ({}, {}, {})", n, c.r, c.g, c.b);
    }

    for n in 0..(lzp.frame_count() as usize) {
        let pixels = lzp.decode_frame(n)?;
        for row in pixels.chunks(17) {
            let line: Vec<String> = row.iter().map(|c| format!("{:02x}", c)).collect();
            println!("{}", line.join(" "));
        }
        println!("-----");
    }

    Ok(())
}

fn dump(file: &Path, out: &Path, options: DecodeOptions)
        -> LzpResult<()> {
    let mut lzp = open(file, options)?;
    let stem = mangle_name(file);

    fs::create_dir_all(out)?;
    for n in 0..(lzp.frame_count() as usize) {
        let pixels = lzp.decode_frame(n)?;
        fs::write(out.join(format!("{}.{:04x}.bin", stem, n)), &pixels)?;
    }

    Ok(())
}

/// Flatten a path into a file name: dots are removed and path
/// separators become underscores.
fn mangle_name(file: &Path) -> String {
    file.to_string_lossy()
        .replace('.', "")
        .replace('\\', "_")
        .replace('/', "_")
}
