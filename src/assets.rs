use crate::config::AppConfig;
use crate::models::{SiteIcon, SocialMediaLink};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::Path;
use std::sync::Arc;

const SOCIAL_MEDIA_LINKS: &[(&str, &str, &str)] = &[
    ("https://www.facebook.com", "Facebook", "facebook-app-symbol.png"),
    ("https://www.twitter.com", "Twitter", "twitter.png"),
    ("https://www.instagram.com", "Instagram", "instagram.png"),
    ("https://www.linkedin.com", "Linkedin", "linkedin.png"),
    ("https://www.pinterest.com", "Pinterest", "pinterest-logo.png"),
    ("https://www.youtube.com", "Youtube", "youtube.png"),
];

const SITE_ICONS: &[(&str, &str)] = &[
    ("Site Icon", "woman.png"),
    ("List", "list.png"),
    ("Close", "close.png"),
];

/// Static reference data, built once at startup and returned verbatim.
/// Icons are plain URLs under the configured asset base, or embedded
/// `data:` URIs when an assets directory is configured.
#[derive(Clone)]
pub struct ReferenceData {
    pub social_media_links: Arc<Vec<SocialMediaLink>>,
    pub site_icons: Arc<Vec<SiteIcon>>,
}

impl ReferenceData {
    pub async fn load(config: &AppConfig) -> Self {
        let mut links = Vec::with_capacity(SOCIAL_MEDIA_LINKS.len());
        for (i, (url, name, file)) in SOCIAL_MEDIA_LINKS.iter().enumerate() {
            links.push(SocialMediaLink {
                id: i as i32 + 1,
                url: (*url).to_owned(),
                name: (*name).to_owned(),
                icon: icon_value(config, file).await,
            });
        }

        let mut icons = Vec::with_capacity(SITE_ICONS.len());
        for (i, (name, file)) in SITE_ICONS.iter().enumerate() {
            icons.push(SiteIcon {
                id: i as i32 + 1,
                name: (*name).to_owned(),
                icon: icon_value(config, file).await,
            });
        }

        Self {
            social_media_links: Arc::new(links),
            site_icons: Arc::new(icons),
        }
    }
}

async fn icon_value(config: &AppConfig, file: &str) -> String {
    if let Some(dir) = &config.assets_dir {
        match tokio::fs::read(dir.join(file)).await {
            Ok(bytes) => return data_uri(file, &bytes),
            Err(e) => {
                // Missing asset falls back to the URL form rather than
                // failing startup.
                tracing::warn!("could not embed asset {file}: {e}");
            }
        }
    }
    format!("{}/assets/{}", config.asset_base_url.trim_end_matches('/'), file)
}

fn data_uri(file: &str, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(Path::new(file)).first_or_octet_stream();
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use std::path::PathBuf;

    fn config(assets_dir: Option<PathBuf>) -> AppConfig {
        AppConfig {
            server_addr: "127.0.0.1:0".to_owned(),
            storage: StorageBackend::Memory,
            database_url: String::new(),
            upload_dir: PathBuf::from("uploads"),
            asset_base_url: "http://localhost:3001/".to_owned(),
            assets_dir,
            spa_index: None,
            log_level: "info".to_owned(),
        }
    }

    #[test]
    fn data_uri_carries_the_mime_type() {
        let uri = data_uri("woman.png", b"abc");
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn url_mode_builds_absolute_icon_urls() {
        let data = ReferenceData::load(&config(None)).await;

        assert_eq!(data.social_media_links.len(), 6);
        assert_eq!(data.site_icons.len(), 3);
        assert_eq!(data.social_media_links[0].name, "Facebook");
        assert_eq!(
            data.social_media_links[0].icon,
            "http://localhost:3001/assets/facebook-app-symbol.png"
        );
        assert_eq!(data.site_icons[0].id, 1);
    }

    #[tokio::test]
    async fn embedded_mode_inlines_available_assets() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("woman.png"), b"png-bytes")
            .await
            .unwrap();

        let data = ReferenceData::load(&config(Some(dir.path().to_path_buf()))).await;

        // Present on disk: embedded. Absent: falls back to the URL form.
        assert!(data.site_icons[0].icon.starts_with("data:image/png;base64,"));
        assert!(data.site_icons[1].icon.starts_with("http://"));
    }
}
