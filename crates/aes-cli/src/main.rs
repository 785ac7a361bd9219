//! Command-line interface for the AES cipher-mode crates.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use aes_modes::{
    CbcMode, CipherMode, CtrMode, GcmMode, Intent, VerificationResult, BLOCK_SIZE,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::RngCore;

/// AES file-encryption CLI.
#[derive(Parser)]
#[command(
    name = "aes",
    version,
    author,
    about = "AES file encryption in CBC, CTR or GCM mode"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Cbc,
    Ctr,
    Gcm,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file.
    Enc {
        /// Operating mode.
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Key as hex; the length selects AES-128/192/256.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 16-byte IV / initial counter (CBC, CTR) or GCM nonce, as hex.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Associated data for GCM, as hex.
        #[arg(long, value_name = "HEX", default_value = "")]
        aad_hex: String,
        /// Input plaintext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path (GCM appends the 16-byte tag).
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file.
    Dec {
        /// Operating mode.
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Key as hex; the length selects AES-128/192/256.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 16-byte IV / initial counter (CBC, CTR) or GCM nonce, as hex.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Associated data for GCM, as hex.
        #[arg(long, value_name = "HEX", default_value = "")]
        aad_hex: String,
        /// Input ciphertext path (GCM expects the tag at the end).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Generate a random key and print it as hex.
    Keygen {
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            mode,
            key_hex,
            iv_hex,
            aad_hex,
            input,
            output,
        } => cmd_enc(mode, &key_hex, &iv_hex, &aad_hex, &input, &output),
        Commands::Dec {
            mode,
            key_hex,
            iv_hex,
            aad_hex,
            input,
            output,
        } => cmd_dec(mode, &key_hex, &iv_hex, &aad_hex, &input, &output),
        Commands::Keygen { bits } => cmd_keygen(bits),
    }
}

fn parse_key(key_hex: &str) -> Result<Vec<u8>> {
    hex::decode(key_hex).context("key is not valid hex")
}

fn parse_block(iv_hex: &str) -> Result<[u8; BLOCK_SIZE]> {
    let bytes = hex::decode(iv_hex).context("IV is not valid hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("IV must be {BLOCK_SIZE} bytes, got {len}"))
}

fn read_input(path: &PathBuf) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: &PathBuf, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn cmd_enc(
    mode: ModeArg,
    key_hex: &str,
    iv_hex: &str,
    aad_hex: &str,
    input: &PathBuf,
    output: &PathBuf,
) -> Result<()> {
    let key = parse_key(key_hex)?;
    let key_bits = key.len() * 8;
    let data = read_input(input)?;

    let out = match mode {
        ModeArg::Cbc => {
            let iv = parse_block(iv_hex)?;
            let mut cipher = CbcMode::new(&key, key_bits, Intent::Encryption)?;
            let mut out = vec![0u8; cipher.output_len(data.len())];
            let written = cipher.encrypt(&data, &mut out, Some(&iv))?;
            out.truncate(written);
            out
        }
        ModeArg::Ctr => {
            let counter = parse_block(iv_hex)?;
            let mut cipher = CtrMode::new(&key, key_bits, Intent::Encryption)?;
            let mut out = vec![0u8; data.len()];
            cipher.encrypt(&data, &mut out, Some(&counter))?;
            out
        }
        ModeArg::Gcm => {
            let nonce = hex::decode(iv_hex).context("nonce is not valid hex")?;
            let aad = hex::decode(aad_hex).context("AAD is not valid hex")?;
            let cipher = GcmMode::new(&key, key_bits, Intent::Encryption)?;
            let mut out = vec![0u8; data.len() + BLOCK_SIZE];
            let mut tag = [0u8; BLOCK_SIZE];
            cipher.encrypt(&data, &mut out[..data.len()], &nonce, &aad, &mut tag)?;
            out[data.len()..].copy_from_slice(&tag);
            out
        }
    };

    write_output(output, &out)
}

fn cmd_dec(
    mode: ModeArg,
    key_hex: &str,
    iv_hex: &str,
    aad_hex: &str,
    input: &PathBuf,
    output: &PathBuf,
) -> Result<()> {
    let key = parse_key(key_hex)?;
    let key_bits = key.len() * 8;
    let data = read_input(input)?;

    let out = match mode {
        ModeArg::Cbc => {
            let iv = parse_block(iv_hex)?;
            let mut cipher = CbcMode::new(&key, key_bits, Intent::Decryption)?;
            let mut out = vec![0u8; data.len()];
            let written = cipher.decrypt(&data, &mut out, Some(&iv))?;
            out.truncate(written);
            out
        }
        ModeArg::Ctr => {
            let counter = parse_block(iv_hex)?;
            let mut cipher = CtrMode::new(&key, key_bits, Intent::Decryption)?;
            let mut out = vec![0u8; data.len()];
            cipher.decrypt(&data, &mut out, Some(&counter))?;
            out
        }
        ModeArg::Gcm => {
            let nonce = hex::decode(iv_hex).context("nonce is not valid hex")?;
            let aad = hex::decode(aad_hex).context("AAD is not valid hex")?;
            if data.len() < BLOCK_SIZE {
                bail!("ciphertext is too short to carry an authentication tag");
            }
            let (ciphertext, tag_bytes) = data.split_at(data.len() - BLOCK_SIZE);
            let tag: [u8; BLOCK_SIZE] = tag_bytes.try_into().expect("split length is sixteen");
            let cipher = GcmMode::new(&key, key_bits, Intent::Decryption)?;
            let mut out = vec![0u8; ciphertext.len()];
            match cipher.decrypt(ciphertext, &mut out, &nonce, &aad, &tag)? {
                VerificationResult::Consistent => out,
                VerificationResult::Inconsistent => {
                    bail!("authentication tag mismatch; refusing to write plaintext")
                }
            }
        }
    };

    write_output(output, &out)
}

fn cmd_keygen(bits: usize) -> Result<()> {
    if !matches!(bits, 128 | 192 | 256) {
        bail!("key size must be 128, 192 or 256 bits, got {bits}");
    }
    let mut key = vec![0u8; bits / 8];
    rand::thread_rng().fill_bytes(&mut key);
    println!("{}", hex::encode(key));
    Ok(())
}
