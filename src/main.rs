//! Keyring CLI application.
//!
//! This binary provides a command-line interface for generating, inspecting
//! and importing key pair files.

use clap::{Parser, Subcommand};
use keyring::error::{KeyRingError, Result};
use keyring::keypair::generate::KeyGenRequest;
use keyring::keypair::{KeyPairRecord, KeyType};
use keyring::storage::encrypted::StoreConfig;
use keyring::storage::keyring::KeyRing;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "keyring")]
#[command(about = "Asymmetric key pair storage with passphrase protection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair and save it to a key file
    Generate {
        /// Key type: rsa, dsa, ecdsa, ecies or ecdh
        #[arg(long = "type")]
        key_type: String,

        /// Modulus size in bits (rsa and dsa)
        #[arg(long)]
        bits: Option<usize>,

        /// Curve name (ecdsa, ecies and ecdh)
        #[arg(long)]
        curve: Option<String>,

        /// Output key file
        #[arg(long)]
        output: PathBuf,

        /// Encrypt the key file under a prompted passphrase
        #[arg(long)]
        encrypt: bool,

        /// PBKDF2 iteration count
        #[arg(long, default_value = "1000")]
        iterations: u32,

        /// AES key size in bits: 128, 192 or 256
        #[arg(long, default_value = "256")]
        key_size: u32,
    },

    /// Show the public key information of a key file
    Info {
        /// Key file to inspect
        #[arg(long)]
        file: PathBuf,

        /// The key file is encrypted; prompt for its passphrase
        #[arg(long)]
        encrypted: bool,

        /// PBKDF2 iteration count used when the file was saved
        #[arg(long, default_value = "1000")]
        iterations: u32,

        /// AES key size in bits used when the file was saved
        #[arg(long, default_value = "256")]
        key_size: u32,
    },

    /// Import a key pair from a JSON field document
    Import {
        /// JSON document with keyType and the hex-encoded key fields
        #[arg(long)]
        file: PathBuf,

        /// Output key file
        #[arg(long)]
        output: PathBuf,

        /// Encrypt the key file under a prompted passphrase
        #[arg(long)]
        encrypt: bool,

        /// PBKDF2 iteration count
        #[arg(long, default_value = "1000")]
        iterations: u32,

        /// AES key size in bits: 128, 192 or 256
        #[arg(long, default_value = "256")]
        key_size: u32,
    },

    /// Export the public key information of a key file as JSON
    Export {
        /// Key file to export from
        #[arg(long)]
        file: PathBuf,

        /// Optional output file (if not specified, prints to stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// The key file is encrypted; prompt for its passphrase
        #[arg(long)]
        encrypted: bool,

        /// PBKDF2 iteration count used when the file was saved
        #[arg(long, default_value = "1000")]
        iterations: u32,

        /// AES key size in bits used when the file was saved
        #[arg(long, default_value = "256")]
        key_size: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            key_type,
            bits,
            curve,
            output,
            encrypt,
            iterations,
            key_size,
        } => handle_generate(&key_type, bits, curve, &output, encrypt, iterations, key_size),
        Commands::Info {
            file,
            encrypted,
            iterations,
            key_size,
        } => handle_info(&file, encrypted, iterations, key_size),
        Commands::Import {
            file,
            output,
            encrypt,
            iterations,
            key_size,
        } => handle_import(&file, &output, encrypt, iterations, key_size),
        Commands::Export {
            file,
            output,
            encrypted,
            iterations,
            key_size,
        } => handle_export(&file, output.as_deref(), encrypted, iterations, key_size),
    }
}

fn store_config(iterations: u32, key_size: u32) -> StoreConfig {
    StoreConfig {
        pbkdf_iterations: iterations,
        aes_key_size_bits: key_size,
    }
}

/// Prompt for a save passphrase, or return None when encryption is off.
fn save_passphrase(encrypt: bool) -> Result<Option<String>> {
    if !encrypt {
        return Ok(None);
    }
    let passphrase = rpassword::prompt_password("Enter passphrase to encrypt key file: ")?;
    Ok(Some(passphrase))
}

/// Prompt for a load passphrase, or return None for plain files.
fn load_passphrase(encrypted: bool) -> Result<Option<String>> {
    if !encrypted {
        return Ok(None);
    }
    let passphrase = rpassword::prompt_password("Enter passphrase to decrypt key file: ")?;
    Ok(Some(passphrase))
}

fn build_request(
    key_type: &str,
    bits: Option<usize>,
    curve: Option<String>,
) -> Result<KeyGenRequest> {
    let parsed = KeyType::from_name(key_type)?;
    let require_bits = || {
        bits.ok_or_else(|| {
            KeyRingError::InvalidArgument(format!("--bits is required for {}", key_type))
        })
    };
    let require_curve = || {
        curve.clone().ok_or_else(|| {
            KeyRingError::InvalidArgument(format!("--curve is required for {}", key_type))
        })
    };

    match parsed {
        KeyType::Rsa => Ok(KeyGenRequest::Rsa {
            modulus_bits: require_bits()?,
        }),
        KeyType::Dsa => Ok(KeyGenRequest::Dsa {
            modulus_bits: require_bits()?,
        }),
        KeyType::Ecdsa => Ok(KeyGenRequest::Ecdsa {
            curve_name: require_curve()?,
        }),
        KeyType::Ecies => Ok(KeyGenRequest::Ecies {
            curve_name: require_curve()?,
        }),
        KeyType::Ecdh => Ok(KeyGenRequest::Ecdh {
            curve_name: require_curve()?,
        }),
    }
}

fn handle_generate(
    key_type: &str,
    bits: Option<usize>,
    curve: Option<String>,
    output: &Path,
    encrypt: bool,
    iterations: u32,
    key_size: u32,
) -> Result<()> {
    let request = build_request(key_type, bits, curve)?;
    let config = store_config(iterations, key_size);

    let mut ring = KeyRing::new();
    let info = ring.create_key_pair(&request)?;

    let passphrase = save_passphrase(encrypt)?;
    ring.save(output, passphrase.as_deref(), &config)?;

    println!("Generated {} key pair: {}", key_type, output.display());
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}

fn handle_info(file: &Path, encrypted: bool, iterations: u32, key_size: u32) -> Result<()> {
    let config = store_config(iterations, key_size);
    let passphrase = load_passphrase(encrypted)?;

    let ring = KeyRing::open(file, passphrase.as_deref(), &config)?;
    let info = ring.public_key_info()?;

    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}

fn handle_import(
    file: &Path,
    output: &Path,
    encrypt: bool,
    iterations: u32,
    key_size: u32,
) -> Result<()> {
    let document = fs::read_to_string(file)?;
    let fields: HashMap<String, String> = serde_json::from_str(&document)?;
    let record = KeyPairRecord::from_fields(&fields)?;
    let key_type = record.key_type().as_str();

    let config = store_config(iterations, key_size);
    let passphrase = save_passphrase(encrypt)?;

    let mut ring = KeyRing::new();
    ring.set_record(record);
    ring.save(output, passphrase.as_deref(), &config)?;

    println!("Imported {} key pair: {}", key_type, output.display());

    Ok(())
}

fn handle_export(
    file: &Path,
    output: Option<&Path>,
    encrypted: bool,
    iterations: u32,
    key_size: u32,
) -> Result<()> {
    let config = store_config(iterations, key_size);
    let passphrase = load_passphrase(encrypted)?;

    let ring = KeyRing::open(file, passphrase.as_deref(), &config)?;
    let info = ring.public_key_info()?;
    let json = serde_json::to_string_pretty(&info)?;

    // Only the public projection is ever exported.
    if let Some(output_path) = output {
        fs::write(output_path, json.as_bytes())?;
        println!("Exported public key info to: {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
