//! Byte cursor helpers shared by every layer of the codec.
//!
//! Reads go through [`WireRead`], which checks the remaining length before
//! touching the buffer so a short packet surfaces as
//! [`Error::BufferUnderrun`] instead of a panic inside `bytes`. All integers
//! are big-endian.

use std::net::Ipv4Addr;

use bytes::{Buf, BufMut, Bytes};

use super::{Error, MAX_MESSAGE_SIZE, Result};

/// Checked big-endian reads over any [`Buf`].
pub(crate) trait WireRead: Buf {
    /// Fail with an underrun unless `needed` bytes remain
    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if available < needed {
            return Err(Error::BufferUnderrun { needed, available });
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.get_u8())
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.get_u16())
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.get_u32())
    }

    fn read_addr(&mut self) -> Result<Ipv4Addr> {
        self.read_u32().map(Ipv4Addr::from)
    }

    /// Split off exactly `len` bytes, advancing the cursor past them
    fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.ensure(len)?;
        Ok(self.copy_to_bytes(len))
    }
}

impl<B: Buf + ?Sized> WireRead for B {}

/// Big-endian writes over any [`BufMut`].
pub(crate) trait WireWrite: BufMut {
    fn put_addr(&mut self, addr: Ipv4Addr) {
        self.put_slice(&addr.octets());
    }
}

impl<B: BufMut + ?Sized> WireWrite for B {}

/// Convert a measured length into a 16-bit size field.
///
/// Encoding trusts the caller to keep messages within the 16-bit limit.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn size_field(len: usize) -> u16 {
    debug_assert!(len <= MAX_MESSAGE_SIZE, "size field overflow: {len} bytes");
    len as u16
}

/// Decode a list of addresses filling `body` exactly.
pub(crate) fn read_addr_list(body: &mut Bytes, field: &'static str) -> Result<Vec<Ipv4Addr>> {
    let len = body.remaining();
    if len % 4 != 0 {
        return Err(Error::MalformedLength {
            field,
            declared: len,
            reason: "not a multiple of the address size",
        });
    }

    let mut addrs = Vec::with_capacity(len / 4);
    while body.has_remaining() {
        addrs.push(body.read_addr()?);
    }
    Ok(addrs)
}
