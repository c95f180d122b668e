//! Nerd Font glyphs for tree nodes.

use kpttree_core::Glyph;

/// Returns the Nerd Font icon for a glyph, followed by a space.
pub fn icon_for_glyph(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Folder => "\u{f07b} ",
        Glyph::Kptfile => "\u{f487} ",
        Glyph::Yaml => "\u{e6a8} ",
        Glyph::File => "\u{f15b} ",
    }
}

/// Disclosure marker in front of directories.
pub fn disclosure(is_dir: bool, expanded: bool) -> &'static str {
    match (is_dir, expanded) {
        (true, true) => "\u{25be} ",
        (true, false) => "\u{25b8} ",
        (false, _) => "  ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_has_a_distinct_icon() {
        let icons = [
            icon_for_glyph(Glyph::Folder),
            icon_for_glyph(Glyph::Kptfile),
            icon_for_glyph(Glyph::Yaml),
            icon_for_glyph(Glyph::File),
        ];
        for (i, a) in icons.iter().enumerate() {
            assert!(a.ends_with(' '));
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn disclosure_markers() {
        assert_eq!(disclosure(true, true), "\u{25be} ");
        assert_eq!(disclosure(true, false), "\u{25b8} ");
        assert_eq!(disclosure(false, true), "  ");
        assert_eq!(disclosure(false, false), "  ");
    }
}
