//! Link Transport boundary: one byte stream per physical panel.
//!
//! Each connected panel owns a write half, used from the tick loop, and a
//! read task that only logs what the panel sends back.  Disconnecting
//! cancels and awaits the read task before the writer is shut down, and every
//! reconnect gets a fresh token and task.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::encoder::{self, FRAME_TAG};
use crate::error::LinkError;
use crate::frame::{panel_position, FrameBuffer, PANEL_COUNT};

/// Delay between the blank frame and the panel-number frame of a test.
pub const TEST_PATTERN_DELAY: Duration = Duration::from_millis(500);

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

// ── Endpoints ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// `tcp://host:port`, e.g. a serial-to-network bridge.
    Tcp(String),
    /// A character device such as `/dev/ttyUSB0`, or a FIFO.
    Device(PathBuf),
}

impl FromStr for Endpoint {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(addr) = s.strip_prefix("tcp://") {
            if addr.is_empty() || !addr.contains(':') {
                return Err(LinkError::InvalidEndpoint(s.to_string()));
            }
            return Ok(Endpoint::Tcp(addr.to_string()));
        }
        if s.is_empty() || s.contains("://") {
            return Err(LinkError::InvalidEndpoint(s.to_string()));
        }
        Ok(Endpoint::Device(PathBuf::from(s)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => write!(f, "tcp://{addr}"),
            Endpoint::Device(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn open_endpoint(endpoint: &Endpoint) -> Result<(BoxedReader, BoxedWriter), LinkError> {
    let open_err = |source: std::io::Error| LinkError::Open {
        endpoint: endpoint.to_string(),
        source,
    };
    match endpoint {
        Endpoint::Tcp(addr) => {
            let stream = TcpStream::connect(addr).await.map_err(open_err)?;
            let (reader, writer) = stream.into_split();
            Ok((Box::new(reader), Box::new(writer)))
        }
        Endpoint::Device(path) => device::open(path).map_err(open_err),
    }
}

fn boxed_halves<S>(stream: S) -> (BoxedReader, BoxedWriter)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (reader, writer) = tokio::io::split(stream);
    (Box::new(reader), Box::new(writer))
}

// ── Device streams ────────────────────────────────────────────────────────────

/// Character devices and FIFOs are opened non-blocking and polled by the
/// reactor, so dropping a pending read releases the descriptor at once.
/// Regular files cannot be polled; their reads return immediately, so they
/// go through `tokio::fs`.
#[cfg(unix)]
mod device {
    use std::fs::{File, OpenOptions};
    use std::io::{self, Read, Write};
    use std::os::unix::fs::OpenOptionsExt;
    use std::path::Path;
    use std::pin::Pin;
    use std::task::{ready, Context, Poll};

    use tokio::io::unix::AsyncFd;
    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use super::{boxed_halves, BoxedReader, BoxedWriter};

    pub(super) fn open(path: &Path) -> io::Result<(BoxedReader, BoxedWriter)> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK | libc::O_NOCTTY)
            .open(path)?;
        if file.metadata()?.is_file() {
            return Ok(boxed_halves(tokio::fs::File::from_std(file)));
        }
        Ok(boxed_halves(DeviceStream {
            fd: AsyncFd::new(file)?,
        }))
    }

    struct DeviceStream {
        fd: AsyncFd<File>,
    }

    impl AsyncRead for DeviceStream {
        fn poll_read(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            loop {
                let mut guard = ready!(self.fd.poll_read_ready(cx))?;
                let unfilled = buf.initialize_unfilled();
                match guard.try_io(|inner| inner.get_ref().read(unfilled)) {
                    Ok(Ok(len)) => {
                        buf.advance(len);
                        return Poll::Ready(Ok(()));
                    }
                    Ok(Err(err)) => return Poll::Ready(Err(err)),
                    Err(_would_block) => continue,
                }
            }
        }
    }

    impl AsyncWrite for DeviceStream {
        fn poll_write(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            loop {
                let mut guard = ready!(self.fd.poll_write_ready(cx))?;
                match guard.try_io(|inner| inner.get_ref().write(buf)) {
                    Ok(result) => return Poll::Ready(result),
                    Err(_would_block) => continue,
                }
            }
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }
}

#[cfg(not(unix))]
mod device {
    use std::io;
    use std::path::Path;

    use super::{boxed_halves, BoxedReader, BoxedWriter};

    pub(super) fn open(path: &Path) -> io::Result<(BoxedReader, BoxedWriter)> {
        let file = std::fs::OpenOptions::new().read(true).write(true).open(path)?;
        Ok(boxed_halves(tokio::fs::File::from_std(file)))
    }
}

// ── Read side ─────────────────────────────────────────────────────────────────

async fn read_loop(index: usize, mut reader: BoxedReader, cancel: CancellationToken) {
    let panel = index + 1;
    let mut buf = [0u8; 256];
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            read = reader.read(&mut buf) => match read {
                Ok(0) => {
                    debug!(panel, "panel closed its stream");
                    break;
                }
                Ok(n) => {
                    let text = String::from_utf8_lossy(&buf[..n]);
                    info!(panel, "{FRAME_TAG}{}", text.trim_end());
                }
                Err(e) => {
                    warn!(panel, error = %e, "panel read failed");
                    break;
                }
            }
        }
    }
    trace!(panel, "read task finished");
}

// ── Panel set ─────────────────────────────────────────────────────────────────

struct Connection {
    writer: BoxedWriter,
    cancel: CancellationToken,
    reader: JoinHandle<()>,
}

/// All panel slots, indexed 0..12 (row = i / 4, col = i % 4).
pub struct PanelLinks {
    endpoints: Vec<Option<Endpoint>>,
    slots: Vec<Option<Connection>>,
    /// When the number frame of a running test pattern is due.
    pending_tests: Vec<Option<Instant>>,
}

impl Default for PanelLinks {
    fn default() -> Self {
        PanelLinks::new(Vec::new())
    }
}

impl PanelLinks {
    pub fn new(endpoints: Vec<(usize, Endpoint)>) -> Self {
        let mut slots_endpoints = vec![None; PANEL_COUNT];
        for (index, endpoint) in endpoints {
            if index < PANEL_COUNT {
                slots_endpoints[index] = Some(endpoint);
            }
        }
        PanelLinks {
            endpoints: slots_endpoints,
            slots: (0..PANEL_COUNT).map(|_| None).collect(),
            pending_tests: vec![None; PANEL_COUNT],
        }
    }

    pub fn is_connected(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    pub fn connected_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn endpoint(&self, index: usize) -> Option<&Endpoint> {
        self.endpoints.get(index).and_then(Option::as_ref)
    }

    /// Open the configured endpoint of a panel and run its test pattern.
    /// A no-op when the panel is already connected.
    pub async fn connect(&mut self, index: usize) -> Result<(), LinkError> {
        if self.is_connected(index) {
            return Ok(());
        }
        let endpoint = self
            .endpoint(index)
            .cloned()
            .ok_or(LinkError::Unconfigured(index))?;
        let (reader, writer) = open_endpoint(&endpoint).await?;
        self.install(index, reader, writer)?;
        info!(panel = index + 1, %endpoint, "panel connected");
        self.test_panel(index).await;
        Ok(())
    }

    /// Use an already open duplex stream as the panel's link.
    pub fn attach<S>(&mut self, index: usize, stream: S) -> Result<(), LinkError>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = boxed_halves(stream);
        self.install(index, reader, writer)
    }

    fn install(
        &mut self,
        index: usize,
        reader: BoxedReader,
        writer: BoxedWriter,
    ) -> Result<(), LinkError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(LinkError::NoSuchPanel(index))?;
        if slot.is_some() {
            return Err(LinkError::AlreadyConnected(index));
        }
        let cancel = CancellationToken::new();
        let reader = tokio::spawn(read_loop(index, reader, cancel.clone()));
        *slot = Some(Connection {
            writer,
            cancel,
            reader,
        });
        Ok(())
    }

    /// Release the read task, then close the writer.
    pub async fn disconnect(&mut self, index: usize) {
        let Some(conn) = self.slots.get_mut(index).and_then(Option::take) else {
            return;
        };
        self.pending_tests[index] = None;

        conn.cancel.cancel();
        if let Err(e) = conn.reader.await {
            warn!(panel = index + 1, error = %e, "read task ended abnormally");
        }
        let mut writer = conn.writer;
        if let Err(e) = writer.shutdown().await {
            debug!(panel = index + 1, error = %e, "writer shutdown failed");
        }
        info!(panel = index + 1, "panel disconnected");
    }

    pub async fn toggle(&mut self, index: usize) {
        if self.is_connected(index) {
            self.disconnect(index).await;
        } else if let Err(e) = self.connect(index).await {
            warn!(panel = index + 1, error = %e, "panel connect failed");
        }
    }

    /// Try every configured panel; failures leave that panel disconnected.
    pub async fn connect_all(&mut self) {
        for index in 0..PANEL_COUNT {
            if self.endpoint(index).is_none() {
                continue;
            }
            if let Err(e) = self.connect(index).await {
                warn!(panel = index + 1, error = %e, "panel connect failed");
            }
        }
    }

    pub async fn disconnect_all(&mut self) {
        for index in 0..PANEL_COUNT {
            self.disconnect(index).await;
        }
    }

    /// Write one text frame.  A failed write tears the panel down.
    pub async fn send(&mut self, index: usize, line: &str) -> bool {
        let Some(conn) = self.slots.get_mut(index).and_then(Option::as_mut) else {
            return false;
        };
        let written = write_line(&mut conn.writer, line).await;
        match written {
            Ok(()) => {
                trace!(panel = index + 1, "{}", line.trim_end());
                true
            }
            Err(e) => {
                warn!(panel = index + 1, error = %e, "panel send failed");
                self.disconnect(index).await;
                false
            }
        }
    }

    /// Encode and send every connected panel's slice of the frame.
    pub async fn send_frame(&mut self, frame: &FrameBuffer) {
        for index in 0..PANEL_COUNT {
            if !self.is_connected(index) {
                continue;
            }
            let (row, col) = panel_position(index);
            let line = encoder::frame_line(&encoder::encode_panel(frame, row, col));
            self.send(index, &line).await;
        }
    }

    /// Blank the panel now; its number follows after `TEST_PATTERN_DELAY`.
    pub async fn test_panel(&mut self, index: usize) {
        let blank = encoder::frame_line(&encoder::blank_panel());
        if self.send(index, &blank).await {
            self.pending_tests[index] = Some(Instant::now() + TEST_PATTERN_DELAY);
        }
    }

    pub async fn test_all(&mut self) {
        for index in 0..PANEL_COUNT {
            if self.is_connected(index) {
                self.test_panel(index).await;
            }
        }
    }

    /// Send the number frames of test patterns that have come due.
    pub async fn flush_tests(&mut self, now: Instant) {
        for index in 0..PANEL_COUNT {
            match self.pending_tests[index] {
                Some(due) if due <= now => {
                    self.pending_tests[index] = None;
                    let line = encoder::frame_line(&encoder::panel_number_frame(index));
                    self.send(index, &line).await;
                }
                _ => {}
            }
        }
    }

    pub fn has_pending_tests(&self) -> bool {
        self.pending_tests.iter().any(Option::is_some)
    }
}

async fn write_line(writer: &mut BoxedWriter, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}
