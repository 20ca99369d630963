//! Output file conventions: naming, looping metadata and encoder discovery.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extension of the output animation.
pub const GIF_EXTENSION: &str = "gif";

/// Application extension identifier carrying the GIF loop count.
pub const NETSCAPE_APP_ID: &[u8; 11] = b"NETSCAPE2.0";

/// External encoder probed at startup.
pub const EXTERNAL_ENCODER: &str = "ffmpeg";

/// Normalize a user-supplied file name so it ends in `.gif`.
///
/// Only the line terminator is stripped; the extension check is
/// case-sensitive and any other input (including an empty string or
/// surrounding spaces) is kept as typed.
pub fn resolve_output_path(input: &str) -> PathBuf {
    let name = input.trim_end_matches(['\r', '\n']);
    let suffix = format!(".{}", GIF_EXTENSION);
    if name.ends_with(&suffix) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, suffix))
    }
}

/// Loop count stored in a GIF's NETSCAPE2.0 extension.
///
/// `Some(0)` means loop forever; `None` means the extension is absent and
/// the animation plays once.
pub fn netscape_loop_count(bytes: &[u8]) -> Option<u16> {
    let start = bytes
        .windows(NETSCAPE_APP_ID.len())
        .position(|w| w == NETSCAPE_APP_ID)?;
    // Sub-block: size (3), id (1), loop count (u16 little endian).
    let block = bytes.get(start + NETSCAPE_APP_ID.len()..start + NETSCAPE_APP_ID.len() + 4)?;
    if block[0] != 3 || block[1] != 1 {
        return None;
    }
    Some(u16::from_le_bytes([block[2], block[3]]))
}

/// Search a `PATH`-style list of directories for an executable named `name`.
pub fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var).find_map(|dir| executable_in(&dir, name))
}

fn executable_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }
    if cfg!(windows) {
        let exe = dir.join(format!("{}.exe", name));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}

/// Locate the external video encoder on the current `PATH`.
///
/// The GIF itself is always written in-process; this only reports whether
/// the external tool is installed.
pub fn detect_external_encoder() -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_in_path(EXTERNAL_ENCODER, &path_var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_appends_extension() {
        assert_eq!(resolve_output_path("anim"), PathBuf::from("anim.gif"));
    }

    #[test]
    fn test_keeps_existing_extension() {
        assert_eq!(resolve_output_path("anim.gif"), PathBuf::from("anim.gif"));
    }

    #[test]
    fn test_trims_line_ending() {
        assert_eq!(resolve_output_path("anim\n"), PathBuf::from("anim.gif"));
        assert_eq!(resolve_output_path("out/anim.gif\r\n"), PathBuf::from("out/anim.gif"));
    }

    #[test]
    fn test_keeps_surrounding_spaces() {
        assert_eq!(resolve_output_path(" anim\n"), PathBuf::from(" anim.gif"));
        assert_eq!(resolve_output_path("anim.gif \n"), PathBuf::from("anim.gif .gif"));
    }

    #[test]
    fn test_extension_check_is_case_sensitive() {
        assert_eq!(resolve_output_path("anim.GIF"), PathBuf::from("anim.GIF.gif"));
    }

    #[test]
    fn test_empty_input_accepted() {
        assert_eq!(resolve_output_path(""), PathBuf::from(".gif"));
    }

    #[test]
    fn test_other_extension_gets_gif_appended() {
        assert_eq!(resolve_output_path("anim.mp4"), PathBuf::from("anim.mp4.gif"));
    }

    #[test]
    fn test_netscape_loop_count() {
        let mut bytes = b"GIF89a....".to_vec();
        bytes.extend_from_slice(&[0x21, 0xFF, 0x0B]);
        bytes.extend_from_slice(NETSCAPE_APP_ID);
        bytes.extend_from_slice(&[0x03, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(netscape_loop_count(&bytes), Some(0));

        let len = bytes.len();
        bytes[len - 3] = 0x05;
        assert_eq!(netscape_loop_count(&bytes), Some(5));
    }

    #[test]
    fn test_netscape_loop_count_missing() {
        assert_eq!(netscape_loop_count(b"GIF89a no extension here"), None);

        let mut truncated = b"GIF89a".to_vec();
        truncated.extend_from_slice(NETSCAPE_APP_ID);
        truncated.push(0x03);
        assert_eq!(netscape_loop_count(&truncated), None);
    }

    #[test]
    fn test_find_in_path() {
        let empty = tempdir().unwrap();
        let tools = tempdir().unwrap();
        let tool = tools.path().join("fake-encoder");
        fs::write(&tool, b"").unwrap();

        let path_var = env::join_paths([empty.path(), tools.path()]).unwrap();
        assert_eq!(find_in_path("fake-encoder", &path_var), Some(tool));
        assert_eq!(find_in_path("missing-encoder", &path_var), None);
    }
}
