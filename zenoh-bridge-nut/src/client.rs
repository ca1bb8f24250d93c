//! Async client for the NUT (upsd) line protocol.
//!
//! Implements the small subset the bridge needs: `VER` as a liveness probe,
//! the `USERNAME`/`PASSWORD` handshake, `LIST VAR <ups>` and `LIST UPS`.
//! The protocol is line-oriented; list responses are bracketed by
//! `BEGIN LIST ...` / `END LIST ...`, and failures come back as
//! `ERR <code>` lines.

use std::collections::HashMap;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

/// Error type for NUT protocol operations.
#[derive(Debug, thiserror::Error)]
pub enum NutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Request timed out")]
    Timeout,
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Server error: {0}")]
    Server(String),
}

impl NutError {
    /// The server reported stale data for the UPS.
    pub fn is_data_stale(&self) -> bool {
        matches!(self, NutError::Server(code) if code == "DATA-STALE")
    }

    /// The driver for the UPS is not running.
    pub fn is_driver_not_connected(&self) -> bool {
        matches!(self, NutError::Server(code) if code == "DRIVER-NOT-CONNECTED")
    }
}

/// A connected NUT client.
pub struct NutClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    timeout: Duration,
}

impl NutClient {
    /// Connect to a NUT server.
    ///
    /// When `auth` is set, a non-empty username/password is sent after the
    /// TCP connect; empty credentials are skipped, matching upsd's optional
    /// handshake.
    pub async fn connect(
        host: &str,
        port: u16,
        auth: bool,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, NutError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| NutError::Timeout)??;

        let (read_half, write_half) = stream.into_split();
        let mut client = Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            timeout,
        };

        if auth && !username.is_empty() {
            client.command_ok(&format!("USERNAME {}", username)).await?;
        }
        if auth && !password.is_empty() {
            client.command_ok(&format!("PASSWORD {}", password)).await?;
        }

        Ok(client)
    }

    /// Probe the connection with `VER`.
    ///
    /// Any single-line answer counts as alive; used to detect dead
    /// connections before polling.
    pub async fn ver(&mut self) -> Result<String, NutError> {
        self.send_line("VER").await?;
        let line = self.read_line().await?;
        check_err(&line)?;
        Ok(line)
    }

    /// Fetch all variables of a UPS as a name → value map.
    pub async fn list_vars(&mut self, ups: &str) -> Result<HashMap<String, String>, NutError> {
        let lines = self.list(&format!("LIST VAR {}", ups)).await?;

        let mut vars = HashMap::with_capacity(lines.len());
        for line in lines {
            let (name, value) = parse_var_line(&line, ups)?;
            vars.insert(name, value);
        }
        Ok(vars)
    }

    /// Fetch the names of all UPS devices known to the server, in server order.
    pub async fn list_ups(&mut self) -> Result<Vec<String>, NutError> {
        let lines = self.list("LIST UPS").await?;

        lines.iter().map(|line| parse_ups_line(line)).collect()
    }

    /// Run a LIST command and collect the body lines between BEGIN and END.
    async fn list(&mut self, command: &str) -> Result<Vec<String>, NutError> {
        self.send_line(command).await?;

        let first = self.read_line().await?;
        check_err(&first)?;
        if !first.starts_with("BEGIN ") {
            return Err(NutError::Protocol(format!(
                "Expected BEGIN, got '{}'",
                first
            )));
        }

        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            check_err(&line)?;
            if line.starts_with("END ") {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    /// Send a command expecting a bare `OK` answer.
    async fn command_ok(&mut self, command: &str) -> Result<(), NutError> {
        self.send_line(command).await?;
        let line = self.read_line().await?;
        check_err(&line)?;
        if line.trim() != "OK" {
            return Err(NutError::Protocol(format!("Expected OK, got '{}'", line)));
        }
        Ok(())
    }

    async fn send_line(&mut self, line: &str) -> Result<(), NutError> {
        let framed = format!("{}\n", line);
        tokio::time::timeout(self.timeout, self.writer.write_all(framed.as_bytes()))
            .await
            .map_err(|_| NutError::Timeout)??;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String, NutError> {
        let mut line = String::new();
        let n = tokio::time::timeout(self.timeout, self.reader.read_line(&mut line))
            .await
            .map_err(|_| NutError::Timeout)??;

        if n == 0 {
            return Err(NutError::Protocol("Connection closed by server".into()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Surface an `ERR <code>` response line as a server error.
fn check_err(line: &str) -> Result<(), NutError> {
    if let Some(rest) = line.strip_prefix("ERR ") {
        let code = rest.split_whitespace().next().unwrap_or(rest);
        return Err(NutError::Server(code.to_string()));
    }
    Ok(())
}

/// Parse a `VAR <ups> <name> "<value>"` body line.
fn parse_var_line(line: &str, ups: &str) -> Result<(String, String), NutError> {
    let rest = line
        .strip_prefix("VAR ")
        .and_then(|r| r.strip_prefix(ups))
        .map(str::trim_start)
        .ok_or_else(|| NutError::Protocol(format!("Malformed VAR line: '{}'", line)))?;

    let (name, rest) = rest
        .split_once(' ')
        .ok_or_else(|| NutError::Protocol(format!("Malformed VAR line: '{}'", line)))?;

    Ok((name.to_string(), unquote(rest.trim())?))
}

/// Parse a `UPS <name> "<description>"` body line, returning the name.
fn parse_ups_line(line: &str) -> Result<String, NutError> {
    let rest = line
        .strip_prefix("UPS ")
        .ok_or_else(|| NutError::Protocol(format!("Malformed UPS line: '{}'", line)))?;

    let name = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| NutError::Protocol(format!("Malformed UPS line: '{}'", line)))?;

    Ok(name.to_string())
}

/// Strip the surrounding quotes of a protocol string, handling `\"` and `\\`.
fn unquote(raw: &str) -> Result<String, NutError> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .ok_or_else(|| NutError::Protocol(format!("Expected quoted value, got '{}'", raw)))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(NutError::Protocol(format!("Dangling escape in '{}'", raw))),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_line() {
        let (name, value) = parse_var_line(r#"VAR apc1500 ups.status "OL CHRG""#, "apc1500").unwrap();
        assert_eq!(name, "ups.status");
        assert_eq!(value, "OL CHRG");

        let (name, value) = parse_var_line(r#"VAR apc1500 battery.charge "87""#, "apc1500").unwrap();
        assert_eq!(name, "battery.charge");
        assert_eq!(value, "87");
    }

    #[test]
    fn test_parse_var_line_with_escapes() {
        let (_, value) = parse_var_line(
            r#"VAR apc1500 ups.model "Smart-UPS \"1500\"""#,
            "apc1500",
        )
        .unwrap();
        assert_eq!(value, r#"Smart-UPS "1500""#);
    }

    #[test]
    fn test_parse_var_line_rejects_garbage() {
        assert!(parse_var_line("nonsense", "apc1500").is_err());
        assert!(parse_var_line("VAR other ups.status \"OL\"", "apc1500").is_err());
        assert!(parse_var_line("VAR apc1500 ups.status OL", "apc1500").is_err());
    }

    #[test]
    fn test_parse_ups_line() {
        assert_eq!(
            parse_ups_line(r#"UPS apc1500 "Workshop UPS""#).unwrap(),
            "apc1500"
        );
        assert!(parse_ups_line("BOGUS").is_err());
    }

    #[test]
    fn test_err_codes() {
        let err = check_err("ERR DATA-STALE").unwrap_err();
        assert!(err.is_data_stale());
        assert!(!err.is_driver_not_connected());

        let err = check_err("ERR DRIVER-NOT-CONNECTED").unwrap_err();
        assert!(err.is_driver_not_connected());

        let err = check_err("ERR UNKNOWN-UPS extra words").unwrap_err();
        assert!(matches!(err, NutError::Server(code) if code == "UNKNOWN-UPS"));

        assert!(check_err("OK").is_ok());
        assert!(check_err(r#"VAR x y "z""#).is_ok());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""plain""#).unwrap(), "plain");
        assert_eq!(unquote(r#""with \\ backslash""#).unwrap(), r"with \ backslash");
        assert!(unquote("unquoted").is_err());
    }
}
