use base64::{Engine as _, engine::general_purpose::STANDARD};
use color_eyre::{
    Result,
    eyre::{ensure, eyre},
};

pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Decodes `data:<mime>;base64,<payload>` into raw bytes
pub fn decode(url: &str) -> Result<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| eyre!("Not a data URL: {url}"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| eyre!("Data URL without payload"))?;
    ensure!(
        header.ends_with(";base64"),
        "Unsupported data URL encoding: {header}"
    );
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let bytes = decode("data:image/png;base64,AAEC").unwrap();
        assert_eq!(bytes, vec![0u8, 1, 2]);
    }

    #[test]
    fn rejects_plain_urls() {
        assert!(!is_data_url("https://img.example/x.png"));
        assert!(decode("https://img.example/x.png").is_err());
    }

    #[test]
    fn rejects_non_base64_encoding() {
        let err = decode("data:text/plain,hello").unwrap_err();
        assert!(err.to_string().contains("Unsupported data URL encoding"));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode("data:image/png;base64,!!!").is_err());
    }
}
