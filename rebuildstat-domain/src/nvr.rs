//! Name-version-release parsing and RPM-style version comparison.
//!
//! Parsing normalizes away the packaging metadata that is irrelevant for
//! freshness decisions: the epoch prefix and a trailing distribution tag
//! (`.fc38`). Comparison follows the standard RPM label ordering over
//! `(version, release)`.

use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// A parsed name-version-release identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nvr {
    pub name: String,
    pub epoch: Option<u64>,
    pub version: String,
    pub release: String,
    pub dist_tag: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NvrParseError {
    #[error("not a name-version-release string: {input:?}")]
    Malformed { input: String },

    #[error("invalid epoch in {input:?}")]
    BadEpoch { input: String },
}

impl Nvr {
    /// Parse `name-version-release`, splitting on the last two hyphens.
    ///
    /// An `epoch:` prefix on the version field is stripped into `epoch`;
    /// a trailing `.<token>` on the release field is stripped into
    /// `dist_tag` when the token looks like a distribution tag (starts
    /// with an ASCII letter, e.g. `.fc38`, `.eln120`).
    pub fn parse(raw: &str) -> Result<Self, NvrParseError> {
        let malformed = || NvrParseError::Malformed {
            input: raw.to_string(),
        };

        let (rest, release) = raw.rsplit_once('-').ok_or_else(malformed)?;
        let (name, version) = rest.rsplit_once('-').ok_or_else(malformed)?;
        if name.is_empty() || version.is_empty() || release.is_empty() {
            return Err(malformed());
        }

        let (epoch, version) = match version.split_once(':') {
            Some((epoch, version)) => {
                let epoch = epoch.parse().map_err(|_| NvrParseError::BadEpoch {
                    input: raw.to_string(),
                })?;
                if version.is_empty() {
                    return Err(malformed());
                }
                (Some(epoch), version)
            }
            None => (None, version),
        };

        let (release, dist_tag) = split_dist_tag(release);

        Ok(Self {
            name: name.to_string(),
            epoch,
            version: version.to_string(),
            release,
            dist_tag,
        })
    }

    /// RPM label comparison: `version` first, `release` as the tie break.
    /// Epoch and dist tag are already normalized away.
    pub fn compare(&self, other: &Nvr) -> Ordering {
        match rpm_segment_cmp(&self.version, &other.version) {
            Ordering::Equal => rpm_segment_cmp(&self.release, &other.release),
            ordering => ordering,
        }
    }
}

/// Compare two raw NVR strings with the documented fallback for
/// unparsable input: an unparsable side always sorts older, and two
/// unparsable sides compare equal. A package can never look up to date
/// on the strength of a string that did not parse.
pub fn compare_raw(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse_lenient);
    let b = b.and_then(parse_lenient);
    match (a, b) {
        (Some(a), Some(b)) => a.compare(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn parse_lenient(raw: &str) -> Option<Nvr> {
    match Nvr::parse(raw) {
        Ok(nvr) => Some(nvr),
        Err(err) => {
            debug!(input = raw, error = %err, "unparsable nvr, sorting as older");
            None
        }
    }
}

fn split_dist_tag(release: &str) -> (String, Option<String>) {
    if let Some((kept, tail)) = release.rsplit_once('.')
        && !kept.is_empty()
        && tail.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
    {
        return (kept.to_string(), Some(tail.to_string()));
    }
    (release.to_string(), None)
}

/// The standard package-version ordering rule: alternate maximal runs of
/// digits and of alphabetic characters (separators dropped), numeric runs
/// compare as integers ignoring leading zeros, numeric beats alphabetic,
/// and a leftover run makes that side greater unless it starts at the
/// `~` pre-release marker, which makes it lesser.
fn rpm_segment_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() || j < b.len() {
        while i < a.len() && !a[i].is_ascii_alphanumeric() && a[i] != b'~' {
            i += 1;
        }
        while j < b.len() && !b[j].is_ascii_alphanumeric() && b[j] != b'~' {
            j += 1;
        }

        let a_tilde = i < a.len() && a[i] == b'~';
        let b_tilde = j < b.len() && b[j] == b'~';
        if a_tilde || b_tilde {
            if a_tilde && b_tilde {
                i += 1;
                j += 1;
                continue;
            }
            // The side with the pre-release marker is older.
            return if a_tilde {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        if i >= a.len() || j >= b.len() {
            break;
        }

        let (start_i, start_j) = (i, j);
        let numeric = a[i].is_ascii_digit();
        if numeric {
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
        } else {
            while i < a.len() && a[i].is_ascii_alphabetic() {
                i += 1;
            }
            while j < b.len() && b[j].is_ascii_alphabetic() {
                j += 1;
            }
        }

        let seg_a = &a[start_i..i];
        let seg_b = &b[start_j..j];
        if seg_b.is_empty() {
            // Mismatched run types: the numeric run is the newer one.
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        if numeric {
            let trimmed_a = trim_leading_zeros(seg_a);
            let trimmed_b = trim_leading_zeros(seg_b);
            match trimmed_a.len().cmp(&trimmed_b.len()) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
            match trimmed_a.cmp(trimmed_b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }

        match seg_a.cmp(seg_b) {
            Ordering::Equal => continue,
            ordering => return ordering,
        }
    }

    // One side has a non-empty run left over; it is the newer one.
    match (i >= a.len(), j >= b.len()) {
        (true, true) => Ordering::Equal,
        (false, _) => Ordering::Greater,
        (_, false) => Ordering::Less,
    }
}

fn trim_leading_zeros(segment: &[u8]) -> &[u8] {
    let first = segment
        .iter()
        .position(|&c| c != b'0')
        .unwrap_or(segment.len());
    &segment[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_nvr() {
        let nvr = Nvr::parse("bash-5.2.15-3.fc38").expect("parse");
        assert_eq!(nvr.name, "bash");
        assert_eq!(nvr.epoch, None);
        assert_eq!(nvr.version, "5.2.15");
        assert_eq!(nvr.release, "3");
        assert_eq!(nvr.dist_tag.as_deref(), Some("fc38"));
    }

    #[test]
    fn parse_keeps_hyphenated_names_intact() {
        let nvr = Nvr::parse("perl-File-Copy-2.39-497.fc38").expect("parse");
        assert_eq!(nvr.name, "perl-File-Copy");
        assert_eq!(nvr.version, "2.39");
    }

    #[test]
    fn parse_strips_epoch() {
        let nvr = Nvr::parse("openssl-1:3.0.9-2.fc38").expect("parse");
        assert_eq!(nvr.epoch, Some(1));
        assert_eq!(nvr.version, "3.0.9");
    }

    #[test]
    fn parse_keeps_numeric_release_segments() {
        // `.2` is not a dist tag; `.eln120` is.
        let nvr = Nvr::parse("pkg-1.0-1.2").expect("parse");
        assert_eq!(nvr.release, "1.2");
        assert_eq!(nvr.dist_tag, None);

        let nvr = Nvr::parse("pkg-1.0-1.eln120").expect("parse");
        assert_eq!(nvr.release, "1");
        assert_eq!(nvr.dist_tag.as_deref(), Some("eln120"));
    }

    #[test]
    fn parse_rejects_junk() {
        assert!(Nvr::parse("").is_err());
        assert!(Nvr::parse("no-hyphen").is_err());
        assert!(Nvr::parse("just_a_name").is_err());
        assert!(Nvr::parse("-1.0-1").is_err());
        assert!(matches!(
            Nvr::parse("pkg-x:1.0-1"),
            Err(NvrParseError::BadEpoch { .. })
        ));
    }

    fn cmp(a: &str, b: &str) -> Ordering {
        rpm_segment_cmp(a, b)
    }

    #[test]
    fn segment_cmp_numeric_as_integers() {
        assert_eq!(cmp("1.10", "1.9"), Ordering::Greater);
        assert_eq!(cmp("1.05", "1.5"), Ordering::Equal);
        assert_eq!(cmp("2", "10"), Ordering::Less);
    }

    #[test]
    fn segment_cmp_numeric_beats_alpha() {
        assert_eq!(cmp("1.0", "1.a"), Ordering::Greater);
        assert_eq!(cmp("1.g7", "1.20230101"), Ordering::Less);
    }

    #[test]
    fn segment_cmp_longer_wins_unless_prerelease() {
        assert_eq!(cmp("1.0.1", "1.0"), Ordering::Greater);
        assert_eq!(cmp("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(cmp("1.0~rc1", "1.0~rc2"), Ordering::Less);
    }

    #[test]
    fn segment_cmp_separators_are_ignored() {
        assert_eq!(cmp("1.0.1", "1_0-1"), Ordering::Equal);
    }

    #[test]
    fn compare_falls_through_to_release() {
        let a = Nvr::parse("pkg-1.0-2.fc38").expect("parse");
        let b = Nvr::parse("pkg-1.0-10.fc38").expect("parse");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn compare_ignores_dist_tag_and_epoch() {
        let a = Nvr::parse("pkg-2:1.0-1.fc38").expect("parse");
        let b = Nvr::parse("pkg-1.0-1.fc39").expect("parse");
        assert_eq!(a.compare(&b), Ordering::Equal);
    }

    #[test]
    fn compare_raw_unparsable_sorts_older() {
        assert_eq!(
            compare_raw(Some("garbage"), Some("pkg-1.0-1")),
            Ordering::Less
        );
        assert_eq!(
            compare_raw(Some("pkg-1.0-1"), Some("garbage")),
            Ordering::Greater
        );
        assert_eq!(compare_raw(Some("garbage"), None), Ordering::Equal);
        assert_eq!(compare_raw(None, None), Ordering::Equal);
    }
}
