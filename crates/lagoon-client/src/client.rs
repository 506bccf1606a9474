use lagoon_common::protocol::error::{LagoonError, Result};
use lagoon_common::protocol::{JsonRpcRequest, MAX_ID};
use lagoon_common::transport::{Connection, LineCodec};
use serde_json::{json, Value};

/// Client for the Lagoon key/collection store.
///
/// Owns the endpoint, one TCP connection, and the request id counter. Every
/// operation is strictly synchronous: it blocks until the paired response
/// (or an error) has arrived, and there is never more than one request in
/// flight. The `&mut self` receivers make concurrent use from multiple
/// threads impossible by construction; use one client per worker.
///
/// # Reconnection
///
/// Before every send and every receive the connection is probed without
/// blocking or consuming bytes. A dead connection is dropped and replaced by
/// a fresh one against the same endpoint, once per detected death, with no
/// backoff. A reconnect failure surfaces as [`LagoonError::Connection`].
///
/// # Request Ids
///
/// The counter starts at 1 and increases after each completed call; on the
/// wire it is reduced modulo [`MAX_ID`], so transmitted ids stay in
/// `[0, MAX_ID)`. The server's echoed id is checked against the id that was
/// sent; a mismatch is treated as a protocol violation.
pub struct LagoonClient {
    addr: String,
    conn: Connection,
    next_id: u64,
    /// Wire id of the request sent by the last `invoke`, cleared once its
    /// response has been consumed or lost.
    pending_id: Option<u64>,
}

impl LagoonClient {
    /// Connects to a Lagoon server. The initial connect is eager; a refused
    /// or unreachable endpoint fails here rather than on first use.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let conn = Connection::open(&addr)?;
        Ok(Self {
            addr,
            conn,
            next_id: 1,
            pending_id: None,
        })
    }

    /// Probes the current connection and replaces it if dead. Returns
    /// whether a replacement happened.
    fn ensure_live(&mut self) -> Result<bool> {
        if self.conn.is_live() {
            return Ok(false);
        }
        tracing::debug!("Connection to {} is dead, opening a replacement", self.addr);
        self.conn = Connection::open(&self.addr)?;
        Ok(true)
    }

    /// Sends a request for `method` with positional `params` under the
    /// current id. Pure send; does not wait for the response.
    pub fn invoke(&mut self, method: &str, params: Vec<Value>) -> Result<()> {
        if self.ensure_live()? {
            // Anything still owed on the discarded connection is gone.
            self.pending_id = None;
        }
        let request = JsonRpcRequest::new(self.next_id, method, params);
        tracing::debug!("Invoking {} with id {}", request.method, request.id);
        let encoded = LineCodec::encode_request(&request)?;
        self.conn.send_frame(&encoded)?;
        self.pending_id = Some(request.id);
        Ok(())
    }

    /// Reads and decodes one response frame, returning the result value or
    /// surfacing the server-reported error.
    ///
    /// If the connection died between the send and this receive, the
    /// response to the in-flight request is unrecoverable: the call fails
    /// explicitly with [`LagoonError::Connection`] instead of hanging on the
    /// replacement connection.
    pub fn receive(&mut self) -> Result<Value> {
        if self.ensure_live()? {
            if let Some(id) = self.pending_id.take() {
                return Err(LagoonError::Connection(format!(
                    "connection lost before the response to request {} arrived",
                    id
                )));
            }
        }
        let frame = self.conn.recv_frame()?;
        let response = LineCodec::decode_response(&frame)?;
        if let Some(expected) = self.pending_id.take() {
            if response.id != expected {
                return Err(LagoonError::Decode(format!(
                    "response id {} does not match request id {}",
                    response.id, expected
                )));
            }
        }
        response.into_result()
    }

    /// One full round trip: invoke, receive, bump the id counter.
    pub fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.invoke(method, params)?;
        let value = self.receive()?;
        self.next_id += 1;
        Ok(value)
    }

    /// Creates a collection on the server.
    pub fn create_collection(&mut self, name: &str) -> Result<Value> {
        self.call("createCollection", vec![json!(name)])
    }

    /// Checks whether `key` exists in `collection`.
    pub fn has_key(&mut self, collection: &str, key: &str) -> Result<Value> {
        self.call("hasKey", vec![json!(collection), json!(key)])
    }

    /// Inserts `key` into `collection`.
    pub fn set_key(&mut self, collection: &str, key: &str) -> Result<Value> {
        self.call("setKey", vec![json!(collection), json!(key)])
    }
}
