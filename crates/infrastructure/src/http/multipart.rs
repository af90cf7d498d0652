//! Multipart form encoding.

use reqwest::multipart::{Form, Part};
use wardrobe_application::TransportError;
use wardrobe_domain::{MultipartForm, MultipartPart};

/// Builds a reqwest form from the domain representation.
///
/// File parts without an explicit content type get one guessed from the
/// file name. The boundary and `Content-Type` header are left to reqwest.
///
/// # Errors
///
/// Returns an error if a content type is not a valid MIME type.
pub fn build_form(form: &MultipartForm) -> Result<Form, TransportError> {
    let mut built = Form::new();

    for part in form.parts() {
        match part {
            MultipartPart::Text { name, value } => {
                built = built.text(name.clone(), value.clone());
            }
            MultipartPart::File {
                name,
                file_name,
                bytes,
                content_type,
            } => {
                let mime_type = content_type.clone().unwrap_or_else(|| {
                    mime_guess::from_path(file_name)
                        .first_or_octet_stream()
                        .to_string()
                });

                let file_part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(&mime_type)
                    .map_err(|e| TransportError::InvalidBody(format!("Invalid MIME type: {e}")))?;

                built = built.part(name.clone(), file_part);
            }
        }
    }

    Ok(built)
}
