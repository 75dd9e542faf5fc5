// src/soap/envelope.rs
use quick_xml::events::Event;
use quick_xml::Reader;

use super::SoapError;

/// Escapes the XML special characters the worldserver cares about. `&` goes
/// first so already-escaped entities are not double-mangled. Apostrophes
/// pass through untouched, matching what the server itself accepts.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builds the SOAP 1.1 request envelope for an `executeCommand` call against
/// the `urn:AC` namespace. The skeleton is constant; only the command text
/// varies.
pub fn build_envelope(command: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope
  xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
  xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/"
  xmlns:ns1="urn:AC"
  xmlns:xsd="http://www.w3.org/1999/XMLSchema"
  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <SOAP-ENV:Body>
    <ns1:executeCommand>
      <command>{}</command>
    </ns1:executeCommand>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#,
        escape_xml(command)
    )
}

/// Decodes a response body. Elements are matched by local name only, so
/// `SOAP-ENV:`, `soap:` and unprefixed tags are all accepted. A fault wins
/// over any result; a body with no envelope at all is reported with the raw
/// text attached.
pub fn decode_response(raw: &str) -> Result<String, SoapError> {
    let mut reader = Reader::from_str(raw);

    let mut saw_envelope = false;
    let mut in_body = false;
    let mut in_fault = false;
    let mut fault_seen = false;
    let mut in_faultstring = false;
    let mut fault_text = String::new();
    let mut in_response = false;
    let mut in_result = false;
    let mut result_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(SoapError::Decode {
                    raw: raw.to_string(),
                    cause: e.to_string(),
                })
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Envelope" => saw_envelope = true,
                b"Body" => in_body = true,
                b"Fault" if in_body => {
                    fault_seen = true;
                    in_fault = true;
                }
                b"faultstring" | b"faultString" if in_fault => in_faultstring = true,
                b"executeCommandResponse" if in_body => in_response = true,
                b"result" if in_response => {
                    in_result = true;
                    result_text.get_or_insert_with(String::new);
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"Envelope" => saw_envelope = true,
                b"Fault" if in_body => fault_seen = true,
                b"result" if in_response => {
                    result_text.get_or_insert_with(String::new);
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Body" => in_body = false,
                b"Fault" => in_fault = false,
                b"faultstring" | b"faultString" => in_faultstring = false,
                b"executeCommandResponse" => in_response = false,
                b"result" => in_result = false,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_faultstring || in_result {
                    let text = match t.unescape() {
                        Ok(text) => text,
                        Err(e) => {
                            return Err(SoapError::Decode {
                                raw: raw.to_string(),
                                cause: e.to_string(),
                            })
                        }
                    };
                    if in_faultstring {
                        fault_text.push_str(&text);
                    } else if let Some(buf) = result_text.as_mut() {
                        buf.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if in_faultstring || in_result {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    if in_faultstring {
                        fault_text.push_str(&text);
                    } else if let Some(buf) = result_text.as_mut() {
                        buf.push_str(&text);
                    }
                }
            }
            Ok(_) => {}
        }
    }

    if !saw_envelope {
        return Err(SoapError::UnexpectedResponse(raw.to_string()));
    }
    if fault_seen {
        if fault_text.is_empty() {
            return Err(SoapError::Fault("Unknown SOAP fault".to_string()));
        }
        return Err(SoapError::Fault(fault_text));
    }
    Ok(result_text.unwrap_or_default().trim().to_string())
}
