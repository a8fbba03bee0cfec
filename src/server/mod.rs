//! Listener and connection serving module
//!
//! Owns the TCP accept loop. Each connection's request/response cycle
//! runs as an independent task multiplexed on the current thread's
//! `LocalSet`; handlers never block beyond cheap file reads, so one
//! cooperative execution context is enough.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::app::App;
use crate::logger;

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled
///
/// Reuse flags let a replacement process bind the port while the old
/// one is still draining, so deploys do not race the TIME_WAIT state.
pub fn create_reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Accept loop: serve every inbound connection until the process exits
pub async fn run(listener: TcpListener, app: Arc<App>) -> Result<(), Box<dyn Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => {
                handle_connection(stream, Arc::clone(&app));
            }
            Err(e) => {
                logger::error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve one HTTP/1.1 connection in a spawned task
fn handle_connection(stream: tokio::net::TcpStream, app: Arc<App>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let app = Arc::clone(&app);
                async move { app.handle(req).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::error(&format!("Failed to serve connection: {err:?}"));
        }
    });
}
