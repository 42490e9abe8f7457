//! Site configuration. Every field has a default so JS can override any subset
//! through `start_site_with_config('{"particle_count": 40}')`.

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page probed before following links that point at it.
    pub target_page: String,
    /// Exit transition of a toast before it is detached.
    pub animation_duration_ms: u32,
    pub notification_duration_ms: u32,
    pub easter_egg_duration_ms: u32,
    pub particle_count: usize,
    /// Scroll offset past which the scroll-to-top button shows.
    pub scroll_threshold: f64,
    /// Scroll offset past which the header gets its solid shade.
    pub header_shade_offset: f64,
    /// `None` leaves the probe unbounded.
    pub probe_timeout_ms: Option<u32>,
    pub secret_code: String,
    /// Element ids reached with Alt+1, Alt+2, Alt+3.
    pub section_anchors: Vec<String>,
    pub quotes: Vec<String>,
    pub quote_interval_ms: u32,
    pub hash_scroll_delay_ms: u32,
    pub log_level: String,
    pub messages: Messages,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub not_found: String,
    pub local_warning: String,
    pub loading: String,
    pub easter_egg: String,
    /// Shown when the probe passed but the browser refused to navigate.
    pub navigation_failed: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            target_page: "zoro.html".to_string(),
            animation_duration_ms: 300,
            notification_duration_ms: 6000,
            easter_egg_duration_ms: 8000,
            particle_count: 20,
            scroll_threshold: 300.0,
            header_shade_offset: 50.0,
            probe_timeout_ms: Some(10_000),
            secret_code: "ZORO".to_string(),
            section_anchors: vec![
                "skills".to_string(),
                "timeline".to_string(),
                "stats".to_string(),
            ],
            quotes: vec![
                "Las cicatrices en la espalda son la vergüenza de un espadachín".to_string(),
                "No hay camino recto para llegar al destino".to_string(),
                "El camino del espadachín es solitario".to_string(),
            ],
            quote_interval_ms: 6000,
            hash_scroll_delay_ms: 100,
            log_level: "info".to_string(),
            messages: Messages::default(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_found: "⚔️ La página \"zoro.html\" no se encontró.\n\n¡Crea el archivo \"zoro.html\" en tu proyecto para acceder al perfil completo de Zoro con su biografía, técnicas y galería multimedia!".to_string(),
            local_warning: "⚠️ No se pudo verificar \"zoro.html\".\n\nSi trabajas localmente, asegúrate de crear el archivo \"zoro.html\" en la misma carpeta del proyecto para ver el contenido completo.".to_string(),
            loading: "Cargando el perfil de Zoro...".to_string(),
            easter_egg: "⚔️ ¡Modo Santoryu Activado! ⚔️\n\n¡Nada ocurrió! Zoro se perdió buscando el modo secreto...\n\n\"No hay camino recto para llegar al destino\" - Roronoa Zoro".to_string(),
            navigation_failed: "No se pudo abrir la página.".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SiteResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> SiteResult<()> {
        if self.target_page.trim().is_empty() {
            return Err(SiteError::Invalid("target_page must not be empty"));
        }
        if self.secret_code.trim().is_empty() {
            return Err(SiteError::Invalid("secret_code must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SiteConfig::from_json(r#"{"particle_count": 42, "messages": {"loading": "..."}}"#)
            .unwrap();
        assert_eq!(cfg.particle_count, 42);
        assert_eq!(cfg.messages.loading, "...");
        assert_eq!(cfg.target_page, "zoro.html");
        assert_eq!(cfg.messages.not_found, Messages::default().not_found);
    }

    #[test]
    fn navigation_failure_copy_is_configurable() {
        assert_eq!(Messages::default().navigation_failed, "No se pudo abrir la página.");
        let cfg = SiteConfig::from_json(r#"{"messages": {"navigation_failed": "Oops"}}"#).unwrap();
        assert_eq!(cfg.messages.navigation_failed, "Oops");
        assert_eq!(cfg.messages.loading, Messages::default().loading);
    }

    #[test]
    fn null_timeout_disables_probe_deadline() {
        let cfg = SiteConfig::from_json(r#"{"probe_timeout_ms": null}"#).unwrap();
        assert_eq!(cfg.probe_timeout_ms, None);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = SiteConfig::from_json(r#"{"secret_code": "  "}"#).unwrap_err();
        assert!(matches!(err, SiteError::Invalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn json_output_parses_back_to_the_same_config() {
        let cfg = SiteConfig::default();
        let json = cfg.to_json().unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), cfg);
    }
}
