//! Executables produced by the aXe C build.
//!
//! `make install` drops these into `$PREFIX/bin`; `clean` removes exactly
//! this set and nothing else from that directory.

/// Binaries installed by the aXe C toolkit, in build order.
pub const BINARIES: &[&str] = &[
    "aXe_SEX2GOL",
    "aXe_GOL2AF",
    "aXe_AF2PET",
    "aXe_BE",
    "aXe_PET2SPC",
    "aXe_STAMPS",
    "aXe_DRZPREP",
    "aXe_PETCONT",
    "aXe_PETFF",
    "aXe_DRZ2PET",
    "aXe_GPS",
    "aXe_FILET",
    "aXe_FRIGEN",
    "aXe_FRINGECORR",
    "aXe_TFIT",
    "aXe_INTPIXCORR",
    "aXe_PETIPC",
    "aXe_NICBACK",
    "aXe_TEST",
    "aXe_DIRIMAGE",
    "aXe_SCALEBCK",
];

/// Header generated by `./configure` inside the native source directory.
pub const CONFIG_HEADER: &str = "config.h";

/// Build file generated by `./configure`; its presence means configure ran.
pub const MAKEFILE: &str = "Makefile";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manifest_is_complete_and_unique() {
        assert_eq!(BINARIES.len(), 21);
        let unique: HashSet<_> = BINARIES.iter().collect();
        assert_eq!(unique.len(), BINARIES.len());
    }

    #[test]
    fn test_manifest_names_are_plain_file_names() {
        for name in BINARIES {
            assert!(name.starts_with("aXe_"), "{name}");
            assert!(!name.contains('/'), "{name}");
        }
    }
}
