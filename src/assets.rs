//! Best-effort asset acquisition, performed once before layout begins.
//!
//! A logo can arrive as already-resolved bytes from the caller, a data URL,
//! an http(s) URL or a local path. Every failure here degrades to the text
//! placeholder drawn by the assembler; nothing in this module can abort a
//! render.

use std::io::Read;

/// A decoded logo ready for embedding: raw RGB8 pixels.
pub struct Logo {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Resolve and decode a logo. `bytes` (caller-supplied) wins over `src`.
pub fn resolve_logo(bytes: Option<&[u8]>, src: Option<&str>) -> Option<Logo> {
    let data = match bytes {
        Some(b) => b.to_vec(),
        None => fetch(src?)
            .map_err(|e| log::warn!("could not load logo: {}", e))
            .ok()?,
    };
    decode(&data)
        .map_err(|e| log::warn!("could not decode logo: {}", e))
        .ok()
}

fn fetch(src: &str) -> Result<Vec<u8>, String> {
    if src.starts_with("data:") {
        load_data_url(src)
    } else if src.starts_with("http://") || src.starts_with("https://") {
        load_remote(src)
    } else {
        std::fs::read(src).map_err(|e| format!("failed to read file: {}", e))
    }
}

fn load_data_url(data_url: &str) -> Result<Vec<u8>, String> {
    // data:image/png;base64,xxxxx
    let parts: Vec<&str> = data_url.splitn(2, ',').collect();
    if parts.len() != 2 {
        return Err("invalid data URL format".to_string());
    }
    base64::Engine::decode(&base64::engine::general_purpose::STANDARD, parts[1])
        .map_err(|e| format!("base64 decode error: {}", e))
}

fn load_remote(url: &str) -> Result<Vec<u8>, String> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| format!("HTTP request failed: {}", e))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read response: {}", e))?;
    Ok(bytes)
}

fn decode(data: &[u8]) -> Result<Logo, String> {
    if data.is_empty() {
        return Err("image data is empty".to_string());
    }
    let img = image::ImageReader::new(std::io::Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("failed to guess image format: {}", e))?
        .decode()
        .map_err(|e| format!("failed to decode image: {}", e))?;

    let width = img.width();
    let height = img.height();
    let rgb = img.to_rgb8();
    Ok(Logo {
        pixels: rgb.into_raw(),
        width,
        height,
    })
}
