//! Golden test vectors for deterministic canonicalization.
//!
//! Each vector pins the canonical text and SHA-256 checksum of a document.
//! The document text is written in a non-canonical field order on purpose.

use ratecard_seal_core::{canonical_string, compute_checksum, Document};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input document as JSON text.
    pub document: &'static str,
    /// Expected canonical text.
    pub canonical: &'static str,
    /// Expected checksum (lowercase hex).
    pub checksum: &'static str,
}

/// Checksum of the sample rate card.
pub const SAMPLE_CHECKSUM: &str =
    "1912459e3c549a73679662f199d916adcac2c8c9141dd0d5635e7739f920c733";

/// Checksum of the sample rate card with `name` set to `"Tampered"`.
pub const TAMPERED_CHECKSUM: &str =
    "023ae4b15bcfdfbd8c44387dfd9eff424479882ef713f9dfbdf0bdfc80b8e1fa";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "sample rate card",
            document: r#"{"name":"Test","schema_version":"1.0.0","version":"1.0","date":"2026-01-12","cards":{"default":{"name":"Default","type":"termination","currency":"USD","endpoint":"default"}}}"#,
            canonical: r#"{"cards":{"default":{"currency":"USD","endpoint":"default","name":"Default","type":"termination"}},"date":"2026-01-12","name":"Test","schema_version":"1.0.0","version":"1.0"}"#,
            checksum: SAMPLE_CHECKSUM,
        },
        GoldenVector {
            name: "tampered rate card",
            document: r#"{"version":"1.0","cards":{"default":{"endpoint":"default","currency":"USD","type":"termination","name":"Default"}},"date":"2026-01-12","schema_version":"1.0.0","name":"Tampered"}"#,
            canonical: r#"{"cards":{"default":{"currency":"USD","endpoint":"default","name":"Default","type":"termination"}},"date":"2026-01-12","name":"Tampered","schema_version":"1.0.0","version":"1.0"}"#,
            checksum: TAMPERED_CHECKSUM,
        },
        GoldenVector {
            name: "empty document",
            document: "{}",
            canonical: "{}",
            checksum: "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a",
        },
        GoldenVector {
            name: "integrity fields stripped, other metadata kept",
            document: r#"{"name":"Carrier","metadata":{"checksum":"00","author":"ops","signature":"x"}}"#,
            canonical: r#"{"metadata":{"author":"ops"},"name":"Carrier"}"#,
            checksum: "1919430d613092f283e5b40b912a82dee54cb1b055fb9d825c3de71b804e4a64",
        },
        GoldenVector {
            name: "metadata emptied by stripping is dropped",
            document: r#"{"metadata":{"checksum":"abc"},"name":"Test"}"#,
            canonical: r#"{"name":"Test"}"#,
            checksum: "fc3a123bb54a65eb81ea264de3811bae8a86f092df2f1f99d1fd1a5817c395b3",
        },
        GoldenVector {
            name: "empty metadata is dropped",
            document: r#"{"name":"Test","metadata":{}}"#,
            canonical: r#"{"name":"Test"}"#,
            checksum: "fc3a123bb54a65eb81ea264de3811bae8a86f092df2f1f99d1fd1a5817c395b3",
        },
        GoldenVector {
            name: "integral floats collapse",
            document: r#"{"price":1.0,"neg":-0.0,"big":1e20}"#,
            canonical: r#"{"big":100000000000000000000,"neg":0,"price":1}"#,
            checksum: "9e60ed1551bd02835422629f34e6c056437da31d681efacf242892ef5beab46c",
        },
        GoldenVector {
            name: "exponent notation outside [1e-6, 1e21)",
            document: r#"{"tiny":1e-6,"small":1.5e-7,"huge":-3.420529233873726e102,"big":1e21}"#,
            canonical: r#"{"big":1e+21,"huge":-3.420529233873726e+102,"small":1.5e-7,"tiny":0.000001}"#,
            checksum: "ba631975b6a85679c81e50c62c7775d67715086056a14901deee42e8b4b6f982",
        },
        GoldenVector {
            name: "mixed values",
            document: r#"{"z":"é\n","x":null,"t":true,"rates":[{"rate":0.012,"prefix":"44"},{"prefix":"1","rate":0.0045}],"n":-7,"a":{"c":{},"b":[]}}"#,
            canonical: r#"{"a":{"b":[],"c":{}},"n":-7,"rates":[{"prefix":"44","rate":0.012},{"prefix":"1","rate":0.0045}],"t":true,"x":null,"z":"é\n"}"#,
            checksum: "f78fad9b67c777a92e91dad9b14ffdcfebae175d2a09f19506535027eb1e8c27",
        },
    ]
}

/// Parse a vector's input document.
pub fn document_from_vector(vector: &GoldenVector) -> Document {
    Document::from_json(vector.document).expect("golden vector documents are valid JSON objects")
}

/// Check every vector against the encoder.
///
/// Returns `(name, matches, actual checksum)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let doc = document_from_vector(v);
            let canonical = canonical_string(&doc).unwrap_or_default();
            let checksum = compute_checksum(&doc).unwrap_or_default();
            let matches = canonical == v.canonical && checksum == v.checksum;
            (v.name.to_string(), matches, checksum)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{name}' mismatched, got {actual}");
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
