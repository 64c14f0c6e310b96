//! Action codes
//!
//! The wire protocol selects an operation with the numeric `opt` parameter.
//! The codes form a closed set; anything else is rejected before a handler
//! runs.

/// One supported operation of the file manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListDir,
    MakeFile,
    MakeDirectory,
    DeleteItems,
    CopyItems,
    RenameItem,
    MoveItems,
    DownloadItem,
    ReadFile,
    WriteFile,
    UploadFiles,
    CopyAsFile,
    ZipItems,
    UnzipItems,
}

impl Action {
    /// Resolve a numeric action code. Gaps in the numbering belong to
    /// widget-side operations that never reach the server.
    pub fn from_code(code: u32) -> Option<Action> {
        match code {
            1 => Some(Action::ListDir),
            2 => Some(Action::MakeFile),
            3 => Some(Action::MakeDirectory),
            4 => Some(Action::DeleteItems),
            5 => Some(Action::CopyItems),
            6 => Some(Action::RenameItem),
            7 => Some(Action::MoveItems),
            8 => Some(Action::DownloadItem),
            9 => Some(Action::ReadFile),
            10 => Some(Action::WriteFile),
            11 => Some(Action::UploadFiles),
            14 => Some(Action::CopyAsFile),
            16 => Some(Action::ZipItems),
            17 => Some(Action::UnzipItems),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(Action::from_code(1), Some(Action::ListDir));
        assert_eq!(Action::from_code(11), Some(Action::UploadFiles));
        assert_eq!(Action::from_code(17), Some(Action::UnzipItems));
    }

    #[test]
    fn gaps_and_out_of_range_codes_do_not_resolve() {
        for code in [0, 12, 13, 15, 18, 99] {
            assert_eq!(Action::from_code(code), None, "code {}", code);
        }
    }
}
