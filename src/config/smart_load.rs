use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

/// Config file provider that picks the format from the file extension
///
/// Unknown extensions are read as TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => SmartProvider::Json(Json::file(path)),
        "yaml" | "yml" => SmartProvider::Yaml(Yaml::file(path)),
        _ => SmartProvider::Toml(Toml::file(path)),
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}
