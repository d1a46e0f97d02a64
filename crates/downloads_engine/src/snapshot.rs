use std::fs;
use std::path::{Path, PathBuf};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub html: String,
    pub encoding: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid {encoding}")]
    Decode { encoding: &'static str },
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let bytes = fs::read(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_snapshot(&bytes)
}

/// Decodes page bytes to UTF-8: byte order mark, then a `<meta charset>`
/// near the top of the document, then statistical detection.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(SnapshotError::Decode {
            encoding: used.name(),
        });
    }
    Ok(Snapshot {
        html: text.into_owned(),
        encoding: used.name(),
    })
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    // A UTF-16 declaration inside ASCII-compatible bytes means UTF-8.
    Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins() {
        let snapshot = decode_snapshot(b"\xEF\xBB\xBF<p>caf\xC3\xA9</p>").unwrap();
        assert_eq!(snapshot.encoding, "UTF-8");
        assert_eq!(snapshot.html, "<p>café</p>");
    }

    #[test]
    fn meta_charset_is_honoured() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>caf\xe9</body></html>";
        let snapshot = decode_snapshot(bytes).unwrap();
        assert_eq!(snapshot.encoding, "windows-1252");
        assert!(snapshot.html.contains("café"));
    }

    #[test]
    fn invalid_bytes_for_declared_charset_fail() {
        let bytes = b"<meta charset=\"utf-8\"><p>\xff\xfe\xfd</p>";
        let err = decode_snapshot(bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::Decode { encoding: "UTF-8" }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_snapshot(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
    }
}
