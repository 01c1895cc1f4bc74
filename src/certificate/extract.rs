//! Certificate field extraction utilities.

use chrono::{DateTime, Utc};
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;
use x509_parser::x509::{AttributeTypeAndValue, X509Name};

/// Extracts DNS names from the Subject Alternative Name extension.
///
/// Other name types (IP addresses, e-mail addresses, URIs) are ignored. Names
/// keep the order they have in the certificate.
pub(crate) fn extract_certificate_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    sans
}

/// Converts an ASN.1 UTCTime/GeneralizedTime into a UTC timestamp.
///
/// Returns `None` for instants chrono cannot represent.
pub(crate) fn asn1_time_to_utc(time: &ASN1Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
}

/// Attribute types rendered by short name, in the order their RDNs are built.
///
/// Each entry becomes a single RDN; repeated values of one type are joined
/// with `+`. `CN` and `SERIALNUMBER` keep only their last value.
const NAMED_ATTRIBUTES: [(&str, &str); 9] = [
    ("2.5.4.6", "C"),
    ("2.5.4.8", "ST"),
    ("2.5.4.7", "L"),
    ("2.5.4.9", "STREET"),
    ("2.5.4.17", "POSTALCODE"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.3", "CN"),
    ("2.5.4.5", "SERIALNUMBER"),
];

const ASN1_UTF8_STRING: u8 = 0x0c;
const ASN1_PRINTABLE_STRING: u8 = 0x13;

/// Renders a distinguished name as an RFC 4514 string.
///
/// The most specific RDN comes first and RDNs are separated by a bare `,`,
/// e.g. `CN=Example Test CA,O=Example Org,C=US`. Attributes without a short
/// name are printed as `<dotted-oid>=#<hex DER>` after the named ones.
pub(crate) fn distinguished_name(name: &X509Name<'_>) -> String {
    let mut named: Vec<Vec<&str>> = vec![Vec::new(); NAMED_ATTRIBUTES.len()];
    let mut rdns = Vec::new();

    for attr in name.iter_attributes() {
        let oid = attr.attr_type().to_id_string();
        match NAMED_ATTRIBUTES.iter().position(|(id, _)| *id == oid) {
            // Named attributes with non-string values are dropped.
            Some(index) => {
                if let Ok(value) = attr.as_str() {
                    named[index].push(value);
                }
            }
            None => rdns.push(format!("{oid}=#{}", hex::encode(attribute_der(attr)))),
        }
    }

    for ((_, short_name), values) in NAMED_ATTRIBUTES.iter().zip(named) {
        let values = match *short_name {
            "CN" | "SERIALNUMBER" => match values.last() {
                Some(last) if !last.is_empty() => vec![*last],
                _ => continue,
            },
            _ if values.is_empty() => continue,
            _ => values,
        };
        let rdn: Vec<String> = values
            .iter()
            .map(|value| format!("{short_name}={}", escape_dn_value(value)))
            .collect();
        rdns.push(rdn.join("+"));
    }

    rdns.reverse();
    rdns.join(",")
}

/// Escapes an attribute value for use in an RFC 4514 string.
fn escape_dn_value(value: &str) -> String {
    let last = value.len().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            ' ' => i == 0 || i == last,
            '#' => i == 0,
            _ => false,
        };
        if escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// DER encoding of an attribute value.
///
/// String values are re-encoded as PrintableString when every character
/// allows it and as UTF8String otherwise.
fn attribute_der(attr: &AttributeTypeAndValue<'_>) -> Vec<u8> {
    let (tag, content) = match attr.as_str() {
        Ok(value) if value.bytes().all(is_printable_string_byte) => {
            (ASN1_PRINTABLE_STRING, value.as_bytes())
        }
        Ok(value) => (ASN1_UTF8_STRING, value.as_bytes()),
        Err(_) => {
            let any = attr.attr_value();
            (any.header.tag().0 as u8, any.as_bytes())
        }
    };

    let mut der = vec![tag];
    der.extend(der_length(content.len()));
    der.extend_from_slice(content);
    der
}

fn der_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes: Vec<u8> = len
        .to_be_bytes()
        .into_iter()
        .skip_while(|byte| *byte == 0)
        .collect();
    let mut encoded = vec![0x80 | bytes.len() as u8];
    encoded.extend(bytes);
    encoded
}

fn is_printable_string_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?'
        )
}
