//! Catalog ingestion from JSON Lines files

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::catalog::product::{Catalog, Product};

/// Parse products from JSONL text; blank lines are skipped
pub fn parse_products_jsonl(content: &str, source: &Path) -> Result<Vec<Product>> {
    let mut products = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let product: Product = serde_json::from_str(line).with_context(|| {
            format!("Failed to parse product at {:?} line {}", source, line_no + 1)
        })?;
        products.push(product);
    }

    Ok(products)
}

/// List catalog files under `path`: the file itself, or every `*.jsonl`
/// below a directory in sorted path order
pub fn catalog_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Catalog not found: {:?}", path);
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk catalog dir {:?}", path))?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == "jsonl")
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Load a catalog from one JSONL file or a directory of them
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let mut products = Vec::new();

    for file in catalog_files(path)? {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read catalog file {:?}", file))?;
        let parsed = parse_products_jsonl(&content, &file)?;
        tracing::debug!("Loaded {} products from {:?}", parsed.len(), file);
        products.extend(parsed);
    }

    tracing::info!("Loaded {} products from {:?}", products.len(), path);
    Catalog::new(products)
}

/// Write products to a JSONL file, creating parent directories
pub fn write_catalog_jsonl<P: AsRef<Path>>(path: P, products: &[Product]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create catalog file {:?}", path))?;

    for product in products {
        let json = serde_json::to_string(product)?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} products to {:?}", products.len(), path);
    Ok(())
}
