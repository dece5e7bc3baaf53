//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use storefront_commerce::catalog::Product;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        debug!(config = ?config_path, "loaded configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory product records are read from.
    pub fn products_dir(&self) -> PathBuf {
        let dir = &self.config.catalog.products_dir;
        match self.config_path.as_ref().and_then(|p| p.parent()) {
            Some(base) if dir.is_relative() => self.resolve_path(base.join(dir)),
            _ => self.resolve_path(dir),
        }
    }

    /// Load a product given either a path to a JSON file or a slug found
    /// in the products directory.
    pub fn load_product(&self, product: &str) -> Result<Product> {
        let path = self.product_path(product)?;
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read product: {}", path.display()))?;
        let product = Product::from_json(&json)
            .with_context(|| format!("Failed to parse product: {}", path.display()))?;

        debug!(path = %path.display(), product = %product.id, kind = product.kind().as_str(), "loaded product");
        Ok(product)
    }

    fn product_path(&self, product: &str) -> Result<PathBuf> {
        let direct = self.resolve_path(product);
        if direct.is_file() {
            return Ok(direct);
        }

        let by_slug = self.products_dir().join(format!("{}.json", product));
        if by_slug.is_file() {
            return Ok(by_slug);
        }

        bail!(
            "Product not found: {} (looked for {} and {})",
            product,
            direct.display(),
            by_slug.display()
        )
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storefront-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = scratch_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".storefront.toml"), "").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join(".storefront.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let root = scratch_dir("prefer");
        std::fs::write(root.join("storefront.json"), "{}").unwrap();
        std::fs::write(root.join("storefront.toml"), "").unwrap();

        assert_eq!(find_config_file(&root), Some(root.join("storefront.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_load_product_by_slug() {
        let root = scratch_dir("slug");
        let products = root.join("products");
        std::fs::create_dir_all(&products).unwrap();
        std::fs::write(
            products.join("cable.json"),
            r#"{"id": "p9", "name": "Cable", "price": 350, "stockQuantity": 4}"#,
        )
        .unwrap();

        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: root.clone(),
        };

        let product = ctx.load_product("cable").unwrap();
        assert_eq!(product.name, "Cable");
        assert!(ctx.load_product("missing").is_err());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
