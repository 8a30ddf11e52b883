//! Per-brand artifact resolution.

use crate::series::DailySeries;
use brandcast_common::{Brand, BrandcastError, Result};
use brandcast_config::ArtifactsConfig;
use std::path::PathBuf;

/// Resolved artifact paths for one brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandArtifacts {
    pub brand: Brand,
    pub weights: PathBuf,
    pub manifest: PathBuf,
    pub data: PathBuf,
}

impl BrandArtifacts {
    pub fn resolve(config: &ArtifactsConfig, brand: &Brand) -> Self {
        Self {
            brand: brand.clone(),
            weights: config.model_path(brand),
            manifest: config.manifest_path(brand),
            data: config.data_path(brand),
        }
    }

    /// Required files that do not exist. The manifest is optional.
    pub fn missing(&self) -> Vec<PathBuf> {
        [&self.weights, &self.data]
            .into_iter()
            .filter(|path| !path.exists())
            .cloned()
            .collect()
    }

    /// Loads the daily table, or `MissingArtifact` when it is absent.
    pub fn load_series(&self) -> Result<DailySeries> {
        if !self.data.exists() {
            return Err(BrandcastError::missing_artifact(self.brand.as_str(), &self.data));
        }
        DailySeries::load(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcast_common::test_utils::{create_temp_dir, write_daily_csv};
    use std::path::Path;

    fn config_for(dir: &Path) -> ArtifactsConfig {
        ArtifactsConfig {
            dir: dir.to_path_buf(),
            ..ArtifactsConfig::default()
        }
    }

    #[test]
    fn test_resolve_expands_patterns() {
        let config = config_for(Path::new("/models"));
        let brand = Brand::new("Nike").unwrap();
        let artifacts = BrandArtifacts::resolve(&config, &brand);

        assert_eq!(artifacts.weights, PathBuf::from("/models/Nike_model.safetensors"));
        assert_eq!(artifacts.manifest, PathBuf::from("/models/Nike_model.json"));
        assert_eq!(artifacts.data, PathBuf::from("/models/Nike_data.csv"));
    }

    #[test]
    fn test_missing_lists_required_files_only() {
        let dir = create_temp_dir();
        let config = config_for(dir.path());
        let brand = Brand::new("Apple").unwrap();
        let artifacts = BrandArtifacts::resolve(&config, &brand);

        assert_eq!(artifacts.missing(), vec![artifacts.weights.clone(), artifacts.data.clone()]);

        write_daily_csv(dir.path(), "Apple", &[0.1, 0.2]);
        assert_eq!(artifacts.missing(), vec![artifacts.weights.clone()]);

        std::fs::write(&artifacts.weights, b"").unwrap();
        assert!(artifacts.missing().is_empty());
    }

    #[test]
    fn test_load_series_reports_missing_table() {
        let dir = create_temp_dir();
        let brand = Brand::new("Apple").unwrap();
        let artifacts = BrandArtifacts::resolve(&config_for(dir.path()), &brand);

        match artifacts.load_series().unwrap_err() {
            BrandcastError::MissingArtifact { brand, path } => {
                assert_eq!(brand, "Apple");
                assert_eq!(path, dir.path().join("Apple_data.csv"));
            }
            other => panic!("expected MissingArtifact, got {other:?}"),
        }

        write_daily_csv(dir.path(), "Apple", &[0.1, 0.2, 0.3]);
        assert_eq!(artifacts.load_series().unwrap().len(), 3);
    }
}
