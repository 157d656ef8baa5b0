use crate::domain::checkout::{ConfirmationRequest, TokenizeRequest};
use crate::domain::ports::CheckoutLauncher;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Launcher that prints every request as pretty JSON instead of opening the SDK.
pub struct JsonLauncher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLauncher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> CheckoutLauncher for JsonLauncher<W> {
    fn start_tokenize(&mut self, request: TokenizeRequest) -> Result<()> {
        self.write(&request)
    }

    fn start_3ds(&mut self, request: ConfirmationRequest) -> Result<()> {
        self.write(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_confirmation_request_is_written_as_json() {
        let mut launcher = JsonLauncher::new(Vec::new());
        launcher
            .start_3ds(ConfirmationRequest {
                url: "https://3ds.example.com".to_string(),
            })
            .unwrap();

        let output = String::from_utf8(launcher.into_inner()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["url"], "https://3ds.example.com");
    }
}
