// Copyright (C) 2017-2018 Red Hat, Inc.
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
//
// Author: Gris Ge <fge@redhat.com>

use regex::Regex;

use super::error::*;

const UNIT_PREFIXES: &str = "KMGTPE";

/// Convert human readable size string into integer size in bytes, handy
/// for [`LunCreateOptions::size`][1].
///
/// Following [rules of IEC binary prefixes on size][2].
/// Supported size string formats:
///
///  * `1.5GiB` or `1.5 GiB` gets `(1.5 * (1 << 30)) as u64`.
///  * `2G` and `2g` are the same as `2GiB`.
///  * `2GB` gets `2 * 1_000_000_000`.
///  * `512` and `512B` get `512`.
///
/// # Errors
///
///  * [`OntapError::InvalidArgument`][3]: unknown format, unit or a size
///    not fitting into `u64`.
///
/// [1]: struct.LunCreateOptions.html#structfield.size
/// [2]: https://en.wikipedia.org/wiki/Gibibyte
/// [3]: enum.OntapError.html#variant.InvalidArgument
pub fn size_human_2_size_bytes(s: &str) -> Result<u64> {
    let invalid = || {
        OntapError::InvalidArgument(format!("Invalid size string '{}'", s))
    };
    let regex_size_human = Regex::new(
        r"(?x)
        ^
        ([0-9]+(?:\.[0-9]+)?)  # 1: number
        [\ \t]*                # might have space between number and unit
        ([a-zA-Z]*)             # 2: units
        $
        ",
    )?;
    let cap = regex_size_human.captures(s.trim()).ok_or_else(invalid)?;
    let number: f64 = cap[1].parse().map_err(|_| invalid())?;
    let unit = cap[2].to_uppercase();

    let multiplier: f64 = if unit.is_empty() || unit == "B" {
        1f64
    } else {
        let exp = match unit.chars().next().and_then(|c| UNIT_PREFIXES.find(c))
        {
            Some(i) => (i + 1) as i32,
            None => return Err(invalid()),
        };
        match &unit[1..] {
            "" | "IB" => 1024f64.powi(exp),
            "B" => 1000f64.powi(exp),
            _ => return Err(invalid()),
        }
    };
    let bytes = number * multiplier;
    if bytes > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(bytes as u64)
}

/// Convert size in bytes into human readable string using IEC binary
/// prefixes, e.g. `1.50GiB`.
pub fn size_bytes_2_size_human(i: u64) -> String {
    for (idx, prefix) in UNIT_PREFIXES.char_indices().rev() {
        let unit_bytes = 1u64 << (10 * (idx + 1));
        if i >= unit_bytes {
            return format!(
                "{:.2}{}iB",
                i as f64 / unit_bytes as f64,
                prefix
            );
        }
    }
    format!("{:.2}B", i as f64)
}

pub(crate) fn verify_xml_name(name: &str) -> Result<()> {
    let regex_xml_name = Regex::new(
        r"(?x)
        ^
        [A-Za-z_]           # must not start with digit, '-' or '.'
        [A-Za-z0-9_\.\-]*
        $
        ",
    )?;
    if regex_xml_name.is_match(name) {
        Ok(())
    } else {
        Err(OntapError::InvalidArgument(format!(
            "Invalid XML element name '{}'",
            name
        )))
    }
}

/// Reject characters XML 1.0 does not allow in text, which no escaping
/// can represent.
pub(crate) fn verify_xml_text(text: &str) -> Result<()> {
    let illegal = text.chars().find(|c| match *c {
        '\t' | '\n' | '\r' => false,
        '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => true,
        _ => false,
    });
    match illegal {
        Some(c) => Err(OntapError::InvalidArgument(format!(
            "Text '{}' holds character U+{:04X} which is not allowed in XML",
            text.escape_debug(),
            c as u32
        ))),
        None => Ok(()),
    }
}

/// LUN path should be `/vol/<volume>/<lun>` or
/// `/vol/<volume>/<qtree>/<lun>`.
pub(crate) fn verify_lun_path(path: &str) -> Result<()> {
    let regex_lun_path = Regex::new(
        r"(?x)
        ^/vol
        (?:/[^/\s]+){2,3}
        $
        ",
    )?;
    if regex_lun_path.is_match(path) {
        Ok(())
    } else {
        Err(OntapError::InvalidArgument(format!(
            "Invalid LUN path '{}', should be like '/vol/<volume>/<lun>'",
            path
        )))
    }
}

pub(crate) fn verify_initiator_group(igroup: &str) -> Result<()> {
    if igroup.trim().is_empty() {
        return Err(OntapError::InvalidArgument(
            "Initiator group name should not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Volume size for `volume-size-async`: an optional `+`/`-` prefix for
/// relative resize, a number and an optional `k`, `m`, `g` or `t` unit.
pub(crate) fn verify_volume_size(size: &str) -> Result<()> {
    let regex_vol_size = Regex::new(
        r"(?x)
        ^
        [+\-]?             # grow or shrink by
        [0-9]+
        [kmgtKMGT]?
        $
        ",
    )?;
    if regex_vol_size.is_match(size) {
        Ok(())
    } else {
        Err(OntapError::InvalidArgument(format!(
            "Invalid volume size '{}', should be like '10g' or '+500m'",
            size
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_human_to_bytes() {
        assert_eq!(size_human_2_size_bytes("1GiB").unwrap(), 1 << 30);
        assert_eq!(
            size_human_2_size_bytes("1.5 GiB").unwrap(),
            (1u64 << 30) + (1u64 << 29)
        );
        assert_eq!(size_human_2_size_bytes("2g").unwrap(), 2 << 30);
        assert_eq!(size_human_2_size_bytes("2K").unwrap(), 2048);
        assert_eq!(size_human_2_size_bytes("2GB").unwrap(), 2_000_000_000);
        assert_eq!(size_human_2_size_bytes("512").unwrap(), 512);
        assert_eq!(size_human_2_size_bytes("512B").unwrap(), 512);
        assert!(size_human_2_size_bytes("").is_err());
        assert!(size_human_2_size_bytes("10 XB").is_err());
        assert!(size_human_2_size_bytes("10GiBs").is_err());
        assert!(size_human_2_size_bytes("99999EiB").is_err());
    }

    #[test]
    fn size_bytes_to_human() {
        assert_eq!(size_bytes_2_size_human(512), "512.00B");
        assert_eq!(size_bytes_2_size_human(1 << 30), "1.00GiB");
        assert_eq!(size_bytes_2_size_human(3 << 19), "1.50MiB");
    }

    #[test]
    fn xml_names() {
        assert!(verify_xml_name("lun-create-by-size").is_ok());
        assert!(verify_xml_name("_private.tag").is_ok());
        assert!(verify_xml_name("").is_err());
        assert!(verify_xml_name("-lun").is_err());
        assert!(verify_xml_name("lun<").is_err());
    }

    #[test]
    fn xml_text() {
        assert!(verify_xml_text("tab\tnew line\n\r").is_ok());
        assert!(verify_xml_text("caf\u{e9} \u{1f600}").is_ok());
        assert!(verify_xml_text("c\u{0}d").is_err());
        assert!(verify_xml_text("bell\u{7}").is_err());
        assert!(verify_xml_text("\u{ffff}").is_err());
    }

    #[test]
    fn lun_paths() {
        assert!(verify_lun_path("/vol/vol1/lun1").is_ok());
        assert!(verify_lun_path("/vol/vol1/qtree1/lun1").is_ok());
        assert!(verify_lun_path("/vol/vol1").is_err());
        assert!(verify_lun_path("vol/vol1/lun1").is_err());
        assert!(verify_lun_path("/vol/vol1/a/b/c").is_err());
        assert!(verify_lun_path("/vol/vol 1/lun1").is_err());
    }

    #[test]
    fn volume_sizes() {
        assert!(verify_volume_size("10g").is_ok());
        assert!(verify_volume_size("+500m").is_ok());
        assert!(verify_volume_size("-1T").is_ok());
        assert!(verify_volume_size("1024").is_ok());
        assert!(verify_volume_size("").is_err());
        assert!(verify_volume_size("1.5g").is_err());
        assert!(verify_volume_size("10 GiB").is_err());
    }

    #[test]
    fn initiator_groups() {
        assert!(verify_initiator_group("igroup1").is_ok());
        assert!(verify_initiator_group(" ").is_err());
    }
}
