use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inpaint_mask::config::settings::Settings;
use inpaint_mask::config::strokes::StrokeScript;
use inpaint_mask::config::{self};
use inpaint_mask::session::Session;
use inpaint_mask::session::gallery::Gallery;
use inpaint_mask::store::client::HttpPairStore;
use inpaint_mask::store::{PairId, PairStore};

const USAGE: &str = "\
Usage: inpaint_mask [--config <settings.yaml>] <command> [args]

Commands:
  mask   <image> <strokes.yaml> [-o <out.png>] [--preview <preview.png>]
         Rasterize strokes over an image into mask.png (no network).
  save   <image> <strokes.yaml>
         Rasterize and upload the (original, mask) pair.
  list   List stored pairs.
  get    <id>
         Show one stored pair.
  delete <id> [--yes]
         Delete a stored pair (asks for confirmation unless --yes).
  health Check that the store is reachable.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inpaint_mask=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{USAGE}");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("inpaint_mask {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config_path = match take_option(&mut args, "--config") {
        Ok(p) => p.map(PathBuf::from),
        Err(e) => return fail(&e),
    };
    let settings = match config::load_settings(config_path.as_deref()) {
        Ok(s) => s,
        Err(e) => return fail(&format!("Failed to load settings: {e}")),
    };

    if args.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }
    let command = args.remove(0);
    let result = match command.as_str() {
        "mask" => run_mask(&settings, args),
        "save" => run_save(&settings, args).await,
        "list" => run_list(&settings).await,
        "get" => run_get(&settings, args).await,
        "delete" => run_delete(&settings, args).await,
        "health" => run_health(&settings).await,
        other => Err(format!("Unknown command '{other}'\n{USAGE}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(msg: &str) -> ExitCode {
    eprintln!("ERROR: {msg}");
    ExitCode::FAILURE
}

/// Remove `name <value>` from `args`, returning the value.
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>, String> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        return Err(format!("{name} requires a value"));
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

/// Remove a bare `name` flag from `args`.
fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn expect_positionals(args: &[String], names: &[&str]) -> Result<(), String> {
    if args.len() != names.len() {
        return Err(format!(
            "expected {} argument(s): {}, got {}",
            names.len(),
            names.join(" "),
            args.len()
        ));
    }
    Ok(())
}

/// Load the image, replay the stroke script and generate the mask.
fn build_session(settings: &Settings, image: &Path, strokes: &Path) -> Result<Session, String> {
    let mut session = Session::from_settings(settings).map_err(|e| e.to_string())?;
    let geometry = session
        .load_image_file(image)
        .map_err(|e| format!("Failed to load {}: {e}", image.display()))?;

    let script = StrokeScript::from_file(strokes)
        .map_err(|e| format!("Failed to read {}: {e}", strokes.display()))?;
    let strokes = script
        .to_strokes(session.surface().brush_radius())
        .map_err(|e| e.to_string())?;
    for stroke in strokes {
        session.push_stroke(stroke).map_err(|e| e.to_string())?;
    }

    session.generate_mask().map_err(|e| e.to_string())?;
    eprintln!(
        "Canvas {}x{}, {} stroke(s)",
        geometry.width,
        geometry.height,
        session.surface().strokes().len()
    );
    Ok(session)
}

fn run_mask(settings: &Settings, mut args: Vec<String>) -> Result<(), String> {
    let output = take_option(&mut args, "-o")?.unwrap_or_else(|| ".".to_string());
    let preview = take_option(&mut args, "--preview")?;
    expect_positionals(&args, &["<image>", "<strokes.yaml>"])?;

    let session = build_session(settings, Path::new(&args[0]), Path::new(&args[1]))?;
    let written = session
        .export_mask(Path::new(&output))
        .map_err(|e| format!("Failed to write mask: {e}"))?;

    if let Some(preview_path) = preview {
        let img = session.preview().map_err(|e| e.to_string())?;
        img.save(&preview_path)
            .map_err(|e| format!("Failed to write preview {preview_path}: {e}"))?;
    }

    let digest = session.mask().map(|m| m.digest()).unwrap_or_default();
    eprintln!("OK: {} (sha256 {digest})", written.display());
    Ok(())
}

async fn run_save(settings: &Settings, args: Vec<String>) -> Result<(), String> {
    expect_positionals(&args, &["<image>", "<strokes.yaml>"])?;
    let mut session = build_session(settings, Path::new(&args[0]), Path::new(&args[1]))?;

    let store = HttpPairStore::new(settings.store_url.clone());
    let receipt = session
        .save(&store)
        .await
        .map_err(|e| format!("Failed to save images: {e}"))?;
    eprintln!("OK: saved with id {}", receipt.id);
    Ok(())
}

async fn run_list(settings: &Settings) -> Result<(), String> {
    let store = HttpPairStore::new(settings.store_url.clone());
    let mut gallery = Gallery::new();
    gallery.refresh(&store).await.map_err(|e| e.to_string())?;

    if gallery.pairs().is_empty() {
        eprintln!("No saved image pairs found.");
    }
    for pair in gallery.pairs() {
        println!("{}\t{}", pair.id, pair.created_at.to_rfc3339());
    }
    Ok(())
}

async fn run_get(settings: &Settings, args: Vec<String>) -> Result<(), String> {
    expect_positionals(&args, &["<id>"])?;
    let store = HttpPairStore::new(settings.store_url.clone());
    let pair = store
        .get(&PairId::new(args[0].clone()))
        .await
        .map_err(|e| e.to_string())?;
    println!("id:         {}", pair.id);
    println!("created_at: {}", pair.created_at.to_rfc3339());
    println!("original:   {} bytes", pair.original_image.len());
    println!("mask:       {} bytes", pair.mask_image.len());
    Ok(())
}

async fn run_delete(settings: &Settings, mut args: Vec<String>) -> Result<(), String> {
    let assume_yes = take_flag(&mut args, "--yes");
    expect_positionals(&args, &["<id>"])?;

    let store = HttpPairStore::new(settings.store_url.clone());
    let mut gallery = Gallery::new();
    gallery.refresh(&store).await.map_err(|e| e.to_string())?;

    let id = PairId::new(args[0].clone());
    let Some(intent) = gallery.request_delete(&id) else {
        return Err(format!("No image pair with id {id}"));
    };

    if !assume_yes && !confirm(&format!("Delete image pair {id}? [y/N] ")).await? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    gallery
        .confirm_delete(intent, &store)
        .await
        .map_err(|e| e.to_string())?;
    eprintln!("OK: deleted {id} ({} pair(s) left)", gallery.pairs().len());
    Ok(())
}

async fn run_health(settings: &Settings) -> Result<(), String> {
    let store = HttpPairStore::new(settings.store_url.clone());
    store.health().await.map_err(|e| e.to_string())?;
    eprintln!("OK: {} is healthy", store.base_url());
    Ok(())
}

async fn confirm(prompt: &str) -> Result<bool, String> {
    eprint!("{prompt}");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| e.to_string())?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
