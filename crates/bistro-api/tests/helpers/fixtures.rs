//! Request fixtures.

use axum_test::multipart::{MultipartForm, Part};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub const FIELDS: [(&str, &str); 5] = [
    ("name", "Test Business"),
    ("description", "Test Description"),
    ("email", "test@example.com"),
    ("phone", "0123456789"),
    ("address", "Test Address"),
];

/// The registration fields as JSON, minus `skip`.
pub fn business_json(skip: Option<&str>) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = FIELDS
        .iter()
        .filter(|(name, _)| Some(*name) != skip)
        .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
        .collect();
    serde_json::Value::Object(map)
}

/// The registration fields as a multipart form, minus `skip`.
pub fn business_form(skip: Option<&str>) -> MultipartForm {
    FIELDS
        .iter()
        .filter(|(name, _)| Some(*name) != skip)
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(*name, *value)
        })
}

pub fn image_part(data: Vec<u8>, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(data).file_name(file_name).mime_type(mime_type)
}

pub fn create_png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn create_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, 128])
    });
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode test image");
    buffer
}
