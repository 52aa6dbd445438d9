//! Per-client connection handling

use crate::dispatcher::Dispatcher;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Bytes read from the socket at a time
pub const READ_BUFFER_SIZE: usize = 4096;

/// Serve one client until it disconnects
///
/// Newline-terminated lines are commands, and a line may span several
/// reads. An unterminated fragment is also run as a command once a short
/// read shows the client has stopped sending, or when the client
/// disconnects. Each reply is one write with no terminator added. I/O
/// errors end this connection only.
pub async fn handle_connection(mut socket: TcpStream, peer: SocketAddr, dispatcher: Dispatcher) {
    tracing::info!(%peer, "Client connected");

    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let mut pending: Vec<u8> = Vec::new();

    loop {
        let n = match socket.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(%peer, error = %e, "Read failed, closing connection");
                pending.clear();
                break;
            }
        };

        pending.extend_from_slice(&buffer[..n]);

        let mut lines = Vec::new();
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            lines.push(line);
        }
        if n < READ_BUFFER_SIZE && !pending.is_empty() {
            lines.push(std::mem::take(&mut pending));
        }

        for line in lines {
            if !run_line(&mut socket, peer, &dispatcher, &line).await {
                return;
            }
        }
    }

    if !pending.is_empty() && !run_line(&mut socket, peer, &dispatcher, &pending).await {
        return;
    }

    tracing::info!(%peer, "Client disconnected");
}

/// Dispatch one raw line and write its reply; false once the client is gone
async fn run_line(
    socket: &mut TcpStream,
    peer: SocketAddr,
    dispatcher: &Dispatcher,
    raw: &[u8],
) -> bool {
    let line = String::from_utf8_lossy(raw);
    match dispatcher.dispatch(&line).await {
        Some(reply) if !reply.is_empty() => send_reply(socket, peer, &reply).await,
        _ => true,
    }
}

async fn send_reply(socket: &mut TcpStream, peer: SocketAddr, reply: &str) -> bool {
    if let Err(e) = socket.write_all(reply.as_bytes()).await {
        tracing::warn!(%peer, error = %e, "Write failed, closing connection");
        tracing::info!(%peer, "Client disconnected");
        return false;
    }
    true
}
