use std::sync::Arc;

use crate::features::advertisers::AdvertiserService;
use crate::features::catalog::Catalog;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;

pub struct SitemapService {
    catalog: Arc<Catalog>,
    advertisers: Arc<AdvertiserService>,
    site_url: String,
}

impl SitemapService {
    pub fn new(catalog: Arc<Catalog>, advertisers: Arc<AdvertiserService>, site_url: &str) -> Self {
        Self {
            catalog,
            advertisers,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Front-end paths in sitemap order: home, cities, services, silos, companies
    pub async fn paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(
            1 + self.catalog.cities().len()
                + self.catalog.services().len()
                + self.catalog.silo_count(),
        );
        paths.push("/".to_string());
        paths.extend(self.catalog.cities().iter().map(|c| format!("/{}", c.slug)));
        paths.extend(self.catalog.services().iter().map(|s| format!("/{}", s.slug)));
        for city in self.catalog.cities() {
            for service in self.catalog.services() {
                paths.push(format!("/{}/{}", city.slug, service.slug));
            }
        }

        // Catalog pages are still worth publishing when the store is down
        match self.advertisers.active_short_codes().await {
            Ok(codes) => paths.extend(codes.into_iter().map(|code| format!("/company/{}", code))),
            Err(e) => tracing::error!("Sitemap built without company pages: {:?}", e),
        }

        paths
    }

    pub async fn render(&self) -> String {
        let paths = self.paths().await;

        let mut xml = String::with_capacity(paths.len() * 80);
        xml.push_str(XML_HEADER);
        xml.push('\n');
        xml.push_str(URLSET_OPEN);
        xml.push('\n');
        for path in paths {
            xml.push_str("  <url><loc>");
            xml.push_str(&escape_xml(&format!("{}{}", self.site_url, path)));
            xml.push_str("</loc></url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
