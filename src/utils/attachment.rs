use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::MAX_ATTACHMENT_BYTES;
use crate::core::generation::ImageAttachment;

#[derive(Debug)]
pub enum AttachmentError {
    UnsupportedType { path: PathBuf },
    TooLarge { path: PathBuf, size: u64 },
    Read { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentError::UnsupportedType { path } => write!(
                f,
                "Tipo de imagem não suportado em {} (use png, jpg, webp, gif, heic ou heif)",
                path.display()
            ),
            AttachmentError::TooLarge { path, size } => write!(
                f,
                "{} tem {} bytes; o limite é {} bytes",
                path.display(),
                size,
                MAX_ATTACHMENT_BYTES
            ),
            AttachmentError::Read { path, source } => {
                write!(f, "Falha ao ler {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for AttachmentError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AttachmentError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Media type inferred from the file extension.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

pub fn load_image(path: &Path) -> Result<ImageAttachment, AttachmentError> {
    let mime_type = mime_type_for(path).ok_or_else(|| AttachmentError::UnsupportedType {
        path: path.to_path_buf(),
    })?;

    let read_err = |source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    };
    let size = fs::metadata(path).map_err(read_err)?.len();
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            path: path.to_path_buf(),
            size,
        });
    }

    let bytes = fs::read(path).map_err(read_err)?;
    Ok(ImageAttachment {
        mime_type: mime_type.to_string(),
        bytes,
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    })
}
