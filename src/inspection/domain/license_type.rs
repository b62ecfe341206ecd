use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::License;

/// Longest prefix of a license name or URL that is considered during categorization
const MAX_NORMALIZED_LENGTH: usize = 64;

static NAME_CLEANER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",|\bthe\b|\bversion\b|\blicense\b|\blicence\b|\bv\b|\.$|\(.*\)")
        .expect("license name pattern is valid")
});

static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d)").expect("version prefix pattern is valid"));

/// License category assigned to a declared license.
///
/// Variants are listed in declaration order, which is also the matching order
/// used by [`LicenseType::categorize`]. Restrictiveness is a separate ranking,
/// see [`LicenseType::restrictiveness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "APACHE_2")]
    Apache2,
    #[serde(rename = "BSD_0")]
    Bsd0,
    #[serde(rename = "BSD_1")]
    Bsd1,
    #[serde(rename = "BSD_2")]
    Bsd2,
    #[serde(rename = "BSD_3")]
    Bsd3,
    #[serde(rename = "CC0_1")]
    Cc01,
    #[serde(rename = "CDDL_1")]
    Cddl1,
    #[serde(rename = "CPL_1")]
    Cpl1,
    #[serde(rename = "GPL_2")]
    Gpl2,
    #[serde(rename = "GPL_3")]
    Gpl3,
    #[serde(rename = "AGPL_3")]
    Agpl3,
    #[serde(rename = "LGPL_2")]
    Lgpl2,
    #[serde(rename = "LGPL_3")]
    Lgpl3,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "MIT0")]
    Mit0,
    #[serde(rename = "MPL_1")]
    Mpl1,
    #[serde(rename = "MPL_2")]
    Mpl2,
    #[serde(rename = "ISC")]
    Isc,
    #[serde(rename = "ICU")]
    Icu,
    #[serde(rename = "EPL_1")]
    Epl1,
    #[serde(rename = "EPL_2")]
    Epl2,
    #[serde(rename = "SSPL_1")]
    Sspl1,
    #[serde(rename = "UNLICENSE")]
    Unlicense,
    #[serde(rename = "ZLIB")]
    Zlib,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "NO_LICENSE")]
    NoLicense,
}

impl LicenseType {
    pub const ALL: [LicenseType; 26] = [
        LicenseType::Apache2,
        LicenseType::Bsd0,
        LicenseType::Bsd1,
        LicenseType::Bsd2,
        LicenseType::Bsd3,
        LicenseType::Cc01,
        LicenseType::Cddl1,
        LicenseType::Cpl1,
        LicenseType::Gpl2,
        LicenseType::Gpl3,
        LicenseType::Agpl3,
        LicenseType::Lgpl2,
        LicenseType::Lgpl3,
        LicenseType::Mit,
        LicenseType::Mit0,
        LicenseType::Mpl1,
        LicenseType::Mpl2,
        LicenseType::Isc,
        LicenseType::Icu,
        LicenseType::Epl1,
        LicenseType::Epl2,
        LicenseType::Sspl1,
        LicenseType::Unlicense,
        LicenseType::Zlib,
        LicenseType::Unknown,
        LicenseType::NoLicense,
    ];

    /// Lowercase names (already normalized) that identify this license
    fn names(self) -> &'static [&'static str] {
        match self {
            LicenseType::Apache2 => &[
                "apache software 2.0",
                "apache software 2",
                "apache 2.0",
                "apache 2",
                "al 2.0",
                "al 2",
                "al2",
                "al2.0",
            ],
            LicenseType::Bsd0 => &[
                "0bsd",
                "bsd0",
                "bsd 0",
                "zero clause bsd",
                "bsd zero clause",
                "0 clause bsd",
                "bsd 0 clause",
            ],
            LicenseType::Bsd1 => &["bsd1", "bsd 1", "1 clause bsd", "bsd 1 clause"],
            LicenseType::Bsd2 => &[
                "berkeley software distribution",
                "bsd",
                "bsd2",
                "bsd 2",
                "2 clause bsd",
                "bsd 2 clause",
                "simplified bsd",
                "freebsd",
                "free bsd",
            ],
            LicenseType::Bsd3 => &[
                "bsd3",
                "bsd 3",
                "3 clause bsd",
                "bsd 3 clause",
                "bsdnew",
                "bsd new",
                "newbsd",
                "new bsd",
                "modified bsd",
                "revised bsd",
            ],
            LicenseType::Cc01 => &[
                "cc0",
                "cc0 1",
                "cc0 1.0",
                "creative commons 1.0",
                "creative commons 1",
                "creative commons",
            ],
            LicenseType::Cddl1 => &[
                "cddl",
                "cddl1",
                "cddl1.0",
                "cddl 1",
                "common development and distribution 1.0",
                "common development and distribution 1",
                "common development and distribution",
            ],
            LicenseType::Cpl1 => &[
                "cpl",
                "cpl1",
                "cpl1.0",
                "cpl 1",
                "common public 1.0",
                "common public 1",
                "common public",
            ],
            LicenseType::Gpl2 => &[
                "gpl2",
                "gpl2.0",
                "gpl 2.0",
                "gpl 2",
                "gnu gpl 2.0",
                "gnu gpl 2",
                "gnu gpl2",
                "gnu general public 2.0",
                "gnu general public 2",
                "general public 2.0",
                "general public 2",
            ],
            LicenseType::Gpl3 => &[
                "gpl3",
                "gpl3.0",
                "gpl 3.0",
                "gpl 3",
                "gnu gpl 3.0",
                "gnu gpl 3",
                "gnu gpl3",
                "gnu general public 3.0",
                "gnu general public 3",
                "general public 3.0",
                "general public 3",
            ],
            LicenseType::Agpl3 => &[
                "agpl3",
                "agpl3.0",
                "agpl 3.0",
                "agpl 3",
                "agpl",
                "gnu agpl 3.0",
                "gnu agpl 3",
                "gnu agpl3",
                "gnu agpl",
                "affero gnu general public 3.0",
                "affero gnu general public 3",
                "affero gnu general public",
                "gnu affero general public 3.0",
                "gnu affero general public 3",
                "gnu affero general public",
            ],
            LicenseType::Lgpl2 => &[
                "lgpl2",
                "lgpl2.1",
                "lgpl 2.1",
                "lgpl 2",
                "gnu lgpl 2.1",
                "gnu lgpl 2",
                "gnu lgpl2",
                "gnu lesser general public 2.1",
                "gnu lesser general public 2",
                "lesser general public 2.1",
                "lesser general public 2",
            ],
            LicenseType::Lgpl3 => &[
                "lgpl3",
                "lgpl3.0",
                "lgpl 3.0",
                "lgpl 3",
                "gnu lgpl 3.0",
                "gnu lgpl 3",
                "gnu lgpl3",
                "gnu lesser general public 3.0",
                "gnu lesser general public 3",
                "lesser general public 3.0",
                "lesser general public 3",
            ],
            LicenseType::Mit => &["mit"],
            LicenseType::Mit0 => &["mit0", "mit 0", "mit no attribution"],
            LicenseType::Mpl1 => &[
                "mozilla public 1.1",
                "mozilla public 1",
                "mpl",
                "mpl1",
                "mpl1.1",
                "mpl 1",
                "mpl 1.1",
            ],
            LicenseType::Mpl2 => &[
                "mozilla public 2.0",
                "mozilla public 2",
                "mpl",
                "mpl2",
                "mpl2.0",
                "mpl 2",
                "mpl 2.0",
            ],
            LicenseType::Isc => &["isc"],
            LicenseType::Icu => &["icu"],
            LicenseType::Epl1 => &[
                "eclipse public",
                "eclipse public 1.0",
                "eclipse public 1",
                "epl",
                "epl1",
                "epl1.0",
                "epl 1.0",
                "epl 1",
            ],
            LicenseType::Epl2 => &[
                "eclipse public 2.0",
                "eclipse public 2",
                "epl2",
                "epl2.0",
                "epl 2.0",
                "epl 2",
            ],
            LicenseType::Sspl1 => &[
                "sspl",
                "sspl1",
                "sspl1.0",
                "sspl 1",
                "sspl 1.0",
                "server side public 1.0",
                "server side public 1",
                "server side public",
            ],
            LicenseType::Unlicense => &["unlicense", "public domain", "pd"],
            LicenseType::Zlib => &["zlib", "zlib/libpng", "libpng", "lib png"],
            LicenseType::Unknown | LicenseType::NoLicense => &[],
        }
    }

    /// Normalized URLs (https, no `www.`, no trailing slash) that identify this license
    fn uris(self) -> &'static [&'static str] {
        match self {
            LicenseType::Apache2 => &[
                "https://apache.org/licenses/LICENSE-2.0",
                "https://apache.org/licenses/LICENSE-2.0.txt",
                "https://apache.org/licenses/LICENSE-2.0.html",
                "https://opensource.org/licenses/Apache-2.0",
                "https://opensource.org/licenses/Apache-2-0",
                "https://opensource.org/licenses/apache-2.0",
                "https://opensource.org/licenses/apache-2-0",
                "https://repository.jboss.org/licenses/apache-2.0.txt",
            ],
            LicenseType::Bsd0 => &["https://opensource.org/license/0bsd"],
            LicenseType::Bsd1 => &["https://opensource.org/license/bsd-1-clause"],
            LicenseType::Bsd2 => &[
                "https://opensource.org/licenses/bsd-license.html",
                "https://opensource.org/licenses/bsd-license.php",
                "https://opensource.org/license/BSD-2-Clause",
            ],
            LicenseType::Bsd3 => &["https://opensource.org/licenses/BSD-3-Clause"],
            LicenseType::Cc01 => &["https://repository.jboss.org/licenses/cc0-1.0.txt"],
            LicenseType::Cddl1 => &[
                "https://opensource.org/license/cddl-1-0",
                "https://repository.jboss.org/licenses/cddl.txt",
            ],
            LicenseType::Cpl1 => &["https://opensource.org/license/cpl1.0.txt"],
            LicenseType::Gpl2 => &[
                "https://opensource.org/license/gpl-2-0",
                "https://gnu.org/licenses/old-licenses/gpl-2.0.en.html",
            ],
            LicenseType::Gpl3 => &[
                "https://opensource.org/license/gpl-3-0",
                "https://gnu.org/licenses/gpl-3.0.en.html",
            ],
            LicenseType::Agpl3 => &[
                "https://opensource.org/license/agpl-v3",
                "https://gnu.org/licenses/agpl-3.0.en.html",
            ],
            LicenseType::Lgpl2 => &[
                "https://opensource.org/license/lgpl-2-1",
                "https://gnu.org/licenses/old-licenses/lgpl-2.1.en.html",
            ],
            LicenseType::Lgpl3 => &[
                "https://opensource.org/license/lgpl-3-0",
                "https://gnu.org/licenses/lgpl-3.0.en.html",
            ],
            LicenseType::Mit => &[
                "https://opensource.org/license/mit",
                "https://opensource.org/license/MIT",
            ],
            LicenseType::Mit0 => &[
                "https://opensource.org/license/mit-0",
                "https://opensource.org/license/MIT-0",
            ],
            LicenseType::Mpl1 => &[
                "https://opensource.org/license/mpl-1-1",
                "https://mozilla.org/en-US/MPL/1.1",
            ],
            LicenseType::Mpl2 => &[
                "https://opensource.org/license/mpl-2-0",
                "https://mozilla.org/en-US/MPL/2.0",
            ],
            LicenseType::Isc => &["https://opensource.org/license/isc-license-txt"],
            LicenseType::Icu => &["https://opensource.org/license/icu-license"],
            LicenseType::Epl1 => &[
                "https://opensource.org/license/epl-1-0",
                "https://eclipse.org/legal/epl/epl-v10.html",
            ],
            LicenseType::Epl2 => &[
                "https://opensource.org/license/epl-2-0",
                "https://eclipse.org/legal/epl-2.0",
            ],
            LicenseType::Sspl1 => &["https://spdx.org/licenses/SSPL-1.0.html"],
            LicenseType::Unlicense => &["https://opensource.org/license/unlicense"],
            LicenseType::Zlib => &[
                "https://opensource.org/license/zlib",
                "https://zlib.net/zlib_license.html",
            ],
            LicenseType::Unknown | LicenseType::NoLicense => &[],
        }
    }

    /// Rank where 0 is the most restrictive license type
    pub fn restrictiveness(self) -> usize {
        match self {
            LicenseType::NoLicense => 0,
            LicenseType::Unknown => 1,
            LicenseType::Sspl1 => 2,
            LicenseType::Cc01 => 3,
            LicenseType::Unlicense => 4,
            LicenseType::Agpl3 => 5,
            LicenseType::Cddl1 => 6,
            LicenseType::Gpl2 => 7,
            LicenseType::Gpl3 => 8,
            LicenseType::Lgpl2 => 9,
            LicenseType::Lgpl3 => 10,
            LicenseType::Cpl1 => 11,
            LicenseType::Epl1 => 12,
            LicenseType::Epl2 => 13,
            LicenseType::Mpl1 => 14,
            LicenseType::Mpl2 => 15,
            LicenseType::Bsd1 => 16,
            LicenseType::Bsd3 => 17,
            LicenseType::Apache2 => 18,
            LicenseType::Bsd2 => 19,
            LicenseType::Icu => 20,
            LicenseType::Zlib => 21,
            LicenseType::Isc => 22,
            LicenseType::Mit => 23,
            LicenseType::Bsd0 => 24,
            LicenseType::Mit0 => 25,
        }
    }

    /// Picks the most restrictive of the given types, `None` for an empty input
    pub fn most_restrictive<I>(types: I) -> Option<LicenseType>
    where
        I: IntoIterator<Item = LicenseType>,
    {
        types.into_iter().min_by_key(|t| t.restrictiveness())
    }

    /// Categorizes a declared license by its URL first, then by its name
    pub fn categorize(license: &License) -> LicenseType {
        let uri = license.url.as_deref().map(normalize_uri);
        let name = license.name.as_deref().map(normalize_name);
        Self::ALL
            .into_iter()
            .find(|t| {
                uri.as_deref().is_some_and(|u| t.uris().contains(&u))
                    || name.as_deref().is_some_and(|n| t.names().contains(&n))
            })
            .unwrap_or(LicenseType::Unknown)
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            LicenseType::Apache2 => "Apache 2.0",
            LicenseType::Bsd0 => "BSD 0-Clause",
            LicenseType::Bsd1 => "BSD 1-Clause",
            LicenseType::Bsd2 => "BSD 2-Clause",
            LicenseType::Bsd3 => "BSD 3-Clause",
            LicenseType::Cc01 => "CC0 1.0",
            LicenseType::Cddl1 => "CDDL 1.0",
            LicenseType::Cpl1 => "CPL 1.0",
            LicenseType::Gpl2 => "GPL 2.0",
            LicenseType::Gpl3 => "GPL 3.0",
            LicenseType::Agpl3 => "AGPL 3.0",
            LicenseType::Lgpl2 => "LGPL 2.1",
            LicenseType::Lgpl3 => "LGPL 3.0",
            LicenseType::Mit => "MIT",
            LicenseType::Mit0 => "MIT-0",
            LicenseType::Mpl1 => "MPL 1.1",
            LicenseType::Mpl2 => "MPL 2.0",
            LicenseType::Isc => "ISC",
            LicenseType::Icu => "ICU",
            LicenseType::Epl1 => "EPL 1.0",
            LicenseType::Epl2 => "EPL 2.0",
            LicenseType::Sspl1 => "SSPL 1.0",
            LicenseType::Unlicense => "Unlicense",
            LicenseType::Zlib => "zlib",
            LicenseType::Unknown => "Unknown",
            LicenseType::NoLicense => "No license",
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn truncate(value: &str) -> &str {
    match value.char_indices().nth(MAX_NORMALIZED_LENGTH) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Lowercases, turns `-`/`_` into spaces, drops filler words ("the", "version",
/// "license", "v"), a `v` directly before a digit, commas, a trailing period and
/// parenthesized content, then collapses whitespace.
fn normalize_name(name: &str) -> String {
    let lowered = truncate(name).to_lowercase().replace(['-', '_'], " ");
    let without_prefix = VERSION_PREFIX.replace_all(&lowered, "$1");
    let cleaned = NAME_CLEANER.replace_all(&without_prefix, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `http` becomes `https`, a leading `www.` and a trailing slash are dropped
fn normalize_uri(uri: &str) -> String {
    let normalized = truncate(uri)
        .replace("http://", "https://")
        .replace("//www.", "//");
    normalized
        .strip_suffix('/')
        .map(str::to_string)
        .unwrap_or(normalized)
}
