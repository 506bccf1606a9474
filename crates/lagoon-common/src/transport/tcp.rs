use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::protocol::error::{LagoonError, Result};

/// Timeout for establishing a TCP connection (5 seconds). Send and receive
/// are untimed: a call blocks until its response arrives or the stream fails.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Size of the peek window used by the liveness probe.
const PROBE_WINDOW: usize = 16;

/// Size of one read from the socket while accumulating a frame.
const READ_CHUNK: usize = 4096;

/// Maximum accepted frame size (1 MiB). Bounds allocation when the peer
/// sends garbage with no newline terminator.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// A single TCP connection to the Lagoon server.
///
/// The connection is either *live* (connected, no evidence of closure) or
/// *dead* (peer closed, reset, or never connected). A dead connection is
/// never repaired in place; the owner drops it and [`open`](Self::open)s a
/// replacement.
///
/// # Framing
///
/// Messages are newline-delimited: [`send_frame`](Self::send_frame) writes a
/// complete `\n`-terminated line, [`recv_frame`](Self::recv_frame) reads from
/// the socket until it has seen the `\n` delimiter, accumulating partial
/// reads as needed.
///
/// # Example
///
/// ```no_run
/// use lagoon_common::transport::{Connection, LineCodec};
/// use lagoon_common::protocol::JsonRpcRequest;
/// use serde_json::json;
///
/// let mut conn = Connection::open("127.0.0.1:3030").unwrap();
/// let request = JsonRpcRequest::new(1, "createCollection", vec![json!("users")]);
/// conn.send_frame(&LineCodec::encode_request(&request).unwrap()).unwrap();
/// let response = LineCodec::decode_response(&conn.recv_frame().unwrap()).unwrap();
/// ```
pub struct Connection {
    stream: TcpStream,
    addr: String,
}

impl Connection {
    /// Opens a new connection to a remote endpoint.
    ///
    /// Resolves the address (which may resolve to multiple addresses) and
    /// attempts to connect to each until one succeeds. Failure is
    /// [`LagoonError::Connection`] and is not retried here.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to connect to (e.g., "127.0.0.1:3030")
    pub fn open(addr: &str) -> Result<Self> {
        let socket_addrs = addr
            .to_socket_addrs()
            .map_err(|e| LagoonError::Connection(format!("Invalid address '{}': {}", addr, e)))?;

        let mut last_err = None;
        for socket_addr in socket_addrs {
            match TcpStream::connect_timeout(&socket_addr, CONNECT_TIMEOUT) {
                Ok(stream) => {
                    tracing::debug!("Connected to {}", addr);
                    return Ok(Self {
                        stream,
                        addr: addr.to_string(),
                    });
                }
                Err(e) => {
                    last_err = Some(e);
                }
            }
        }

        Err(LagoonError::Connection(format!(
            "Failed to connect to {}: {}",
            addr,
            last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no addresses resolved".to_string())
        )))
    }

    /// The address this connection was opened against.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Probes whether the peer is still there, without blocking and without
    /// consuming any buffered bytes.
    ///
    /// The socket is flipped to non-blocking for a small `peek` and flipped
    /// back afterwards. Verdicts:
    ///
    /// - zero bytes peeked, no error: the peer performed an orderly close → dead
    /// - the peek would block: connection intact, nothing pending → live
    /// - reset/abort error → dead
    /// - any other error → live; the probe stays lenient and lets the next
    ///   real send or receive surface the failure
    pub fn is_live(&self) -> bool {
        if let Err(err) = self.stream.set_nonblocking(true) {
            tracing::warn!("Liveness probe unavailable ({}), assuming live", err);
            return true;
        }

        let mut window = [0u8; PROBE_WINDOW];
        let verdict = match self.stream.peek(&mut window) {
            Ok(0) => {
                tracing::debug!("Peer closed connection to {}", self.addr);
                false
            }
            Ok(_) => true,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => true,
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::ConnectionAborted
                ) =>
            {
                tracing::debug!("Connection to {} reset: {}", self.addr, e);
                false
            }
            Err(e) => {
                tracing::warn!("Unexpected probe error on {}: {}, assuming live", self.addr, e);
                true
            }
        };

        if let Err(err) = self.stream.set_nonblocking(false) {
            tracing::warn!("Failed to restore blocking mode on {}: {}", self.addr, err);
        }

        tracing::trace!("Liveness probe for {}: live={}", self.addr, verdict);
        verdict
    }

    /// Writes one complete frame and flushes the stream.
    pub fn send_frame(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .map_err(|e| LagoonError::from_io(e, "writing frame"))?;
        self.stream
            .flush()
            .map_err(|e| LagoonError::from_io(e, "flushing stream"))?;
        tracing::trace!("Sent {} byte frame to {}", data.len(), self.addr);
        Ok(())
    }

    /// Reads until one `\n`-terminated frame has arrived, accumulating
    /// partial reads. Returns the frame including its terminator.
    ///
    /// # Errors
    ///
    /// - [`LagoonError::Connection`] if the stream ends before the delimiter
    /// - [`LagoonError::Decode`] if the frame exceeds [`MAX_FRAME_SIZE`]
    pub fn recv_frame(&mut self) -> Result<Vec<u8>> {
        let mut frame = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = self
                .stream
                .read(&mut chunk)
                .map_err(|e| LagoonError::from_io(e, "reading frame"))?;

            if n == 0 {
                return Err(LagoonError::Connection(if frame.is_empty() {
                    format!("{} closed before sending a response", self.addr)
                } else {
                    format!("{} closed mid-frame after {} bytes", self.addr, frame.len())
                }));
            }

            let start = frame.len();
            frame.extend_from_slice(&chunk[..n]);

            // One request in flight means nothing follows the delimiter.
            if let Some(pos) = frame[start..].iter().position(|b| *b == b'\n') {
                frame.truncate(start + pos + 1);
                tracing::trace!("Received {} byte frame from {}", frame.len(), self.addr);
                return Ok(frame);
            }

            if frame.len() > MAX_FRAME_SIZE {
                return Err(LagoonError::Decode(format!(
                    "Frame exceeds {} bytes without a newline terminator",
                    MAX_FRAME_SIZE
                )));
            }
        }
    }
}
