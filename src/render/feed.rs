// Caller-side pump: byte source -> streaming decoder -> render session.
//
// The decoder may take fewer bytes than offered; the unconsumed tail is
// shifted to the front of the buffer and resubmitted, topped up from the
// source, so the decoder always sees the byte stream in order.

extern crate alloc;

use alloc::format;

use super::event::DecodeEvent;
use super::session::{RenderSession, SessionState};
use crate::drivers::Panel;
use crate::error::RenderError;

// bytes offered to the decoder per feed
pub const FEED_BUF: usize = 1024;

/// Sequential byte source; `Ok(0)` means end of stream.
pub trait ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, RenderError>;
}

impl ByteSource for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, RenderError> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

/// A push decoder: consumes a prefix of `bytes`, emitting events as it goes,
/// and returns how many bytes it consumed.
pub trait StreamDecoder {
    fn feed(
        &mut self,
        bytes: &[u8],
        sink: &mut dyn FnMut(DecodeEvent),
    ) -> Result<usize, RenderError>;
}

pub struct Feeder<const N: usize = FEED_BUF> {
    buf: [u8; N],
    avail: usize,
}

impl<const N: usize> Default for Feeder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Feeder<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            avail: 0,
        }
    }

    /// Pump `source` through `decoder` into `session` until the session
    /// flushes, fails, or the source runs dry.
    pub fn run<S, D, P>(
        &mut self,
        source: &mut S,
        decoder: &mut D,
        session: &mut RenderSession<P>,
    ) -> Result<(), RenderError>
    where
        S: ByteSource + ?Sized,
        D: StreamDecoder + ?Sized,
        P: Panel,
    {
        self.avail = 0;
        let mut eof = false;

        loop {
            if !eof && self.avail < N {
                match source.read(&mut self.buf[self.avail..]) {
                    Ok(0) => eof = true,
                    Ok(n) => self.avail += n,
                    Err(e) => return Err(session.abort(e)),
                }
            }
            if self.avail == 0 && eof {
                break;
            }

            let mut failure = None;
            let fed = decoder.feed(&self.buf[..self.avail], &mut |event| {
                if failure.is_none() {
                    if let Err(e) = session.handle(event) {
                        failure = Some(e);
                    }
                }
            });
            if let Some(e) = failure {
                return Err(e);
            }
            let consumed = match fed {
                Ok(n) if n <= self.avail => n,
                Ok(n) => {
                    return Err(session.abort(RenderError::decode(format!(
                        "decoder consumed {} of {} bytes",
                        n, self.avail
                    ))));
                }
                Err(e) => return Err(session.abort(e)),
            };

            self.buf.copy_within(consumed..self.avail, 0);
            self.avail -= consumed;
            log::trace!("feed: consumed {}, {} retained", consumed, self.avail);

            if session.state() == SessionState::Flushed {
                if self.avail > 0 {
                    log::debug!("feed: {} trailing bytes ignored", self.avail);
                }
                return Ok(());
            }

            if consumed == 0 && (eof || self.avail == N) {
                return Err(session.abort(RenderError::decode("decoder stalled")));
            }
        }

        if session.state() == SessionState::Flushed {
            Ok(())
        } else {
            Err(session.abort(RenderError::decode("source ended before image end")))
        }
    }
}
