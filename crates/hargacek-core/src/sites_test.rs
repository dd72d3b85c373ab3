use std::path::Path;

use super::*;

fn site(name: &str) -> SiteProfile {
    SiteProfile {
        name: name.to_string(),
        base_url: "https://www.example.co.id".to_string(),
        search_url: "https://www.example.co.id/search?q={keyword}".to_string(),
        container: ".result".to_string(),
        fields: FieldSelectors {
            name: ".name".to_string(),
            price: ".price".to_string(),
            seller: ".shop".to_string(),
            link: "a".to_string(),
            image: "img".to_string(),
        },
        enabled: true,
    }
}

#[test]
fn slug_simple_name() {
    assert_eq!(site("Blibli Official").slug(), "blibli-official");
}

#[test]
fn slug_special_characters() {
    assert_eq!(site("Toko's Market").slug(), "tokos-market");
}

#[test]
fn slug_collapses_repeated_dashes() {
    assert_eq!(site("Buka--Lapak").slug(), "buka-lapak");
}

#[test]
fn builtin_sites_pass_validation() {
    let file = SitesFile {
        sites: builtin_sites(),
    };
    assert!(validate_sites(&file).is_ok());
    let names: Vec<_> = file.sites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Tokopedia", "Shopee"]);
}

#[test]
fn validate_rejects_empty_name() {
    let file = SitesFile {
        sites: vec![site("  ")],
    };
    let err = validate_sites(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_missing_keyword_placeholder() {
    let mut s = site("Lazada");
    s.search_url = "https://www.lazada.co.id/catalog/?q=".to_string();
    let err = validate_sites(&SitesFile { sites: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("{keyword}"));
}

#[test]
fn validate_rejects_invalid_base_url() {
    let mut s = site("Lazada");
    s.base_url = "lazada.co.id".to_string();
    let err = validate_sites(&SitesFile { sites: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("invalid base_url"));
}

#[test]
fn validate_rejects_non_http_base_url() {
    let mut s = site("Lazada");
    s.base_url = "ftp://lazada.co.id".to_string();
    let err = validate_sites(&SitesFile { sites: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let file = SitesFile {
        sites: vec![site("Shopee"), site("shopee")],
    };
    let err = validate_sites(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate site name"));
}

#[test]
fn validate_rejects_duplicate_slug() {
    let file = SitesFile {
        sites: vec![site("Buka Lapak"), site("Buka--Lapak")],
    };
    let err = validate_sites(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate site slug"));
}

#[test]
fn parse_sites_defaults_enabled_to_true() {
    let yaml = r#"
sites:
  - name: Bukalapak
    base_url: https://www.bukalapak.com
    search_url: https://www.bukalapak.com/products?search%5Bkeywords%5D={keyword}
    container: ".bl-product-card"
    fields:
      name: ".bl-product-card__description-name a"
      price: ".bl-product-card__description-price"
      seller: ".bl-product-card__description-store a"
      link: ".bl-product-card__description-name a"
      image: "img"
"#;
    let file = parse_sites(yaml).expect("valid yaml");
    assert_eq!(file.sites.len(), 1);
    assert!(file.sites[0].enabled);
    assert_eq!(file.sites[0].fields.image, "img");
}

#[test]
fn parse_sites_rejects_malformed_yaml() {
    let err = parse_sites("sites: [name: ").unwrap_err();
    assert!(matches!(err, ConfigError::SitesFileParse(_)));
}

#[test]
fn load_sites_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("sites.yaml");
    assert!(
        path.exists(),
        "sites.yaml missing at {path:?}; required for this test"
    );
    let result = load_sites(&path);
    assert!(result.is_ok(), "failed to load sites.yaml: {result:?}");
    let sites_file = result.unwrap();
    assert!(!sites_file.sites.is_empty());
}

#[test]
fn load_sites_reports_missing_file() {
    let err = load_sites(Path::new("/nonexistent/sites.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SitesFileIo { .. }));
}
