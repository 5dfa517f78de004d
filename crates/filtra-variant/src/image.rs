use std::fmt;
use std::ptr;

/// Non-owning descriptor of an image buffer owned by the host imaging
/// subsystem.
///
/// The container never allocates or frees pixel storage; copying a value
/// that holds an `ImageRef` duplicates only this descriptor. Callers must
/// keep the underlying buffer alive for as long as any value referencing it
/// is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub data: *const u8,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    /// Opaque pixel-format tag assigned by the imaging subsystem.
    pub format: u32,
}

impl ImageRef {
    pub const fn new(data: *const u8, width: u32, height: u32, stride: u32, format: u32) -> Self {
        ImageRef {
            data,
            width,
            height,
            stride,
            format,
        }
    }

    pub const fn null() -> Self {
        ImageRef {
            data: ptr::null(),
            width: 0,
            height: 0,
            stride: 0,
            format: 0,
        }
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    /// `true` when both descriptors reference the same pixel buffer.
    #[inline(always)]
    pub fn same_buffer(&self, other: &ImageRef) -> bool {
        ptr::eq(self.data, other.data)
    }
}

impl Default for ImageRef {
    fn default() -> Self {
        ImageRef::null()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image {}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_descriptor() {
        let img = ImageRef::null();
        assert!(img.is_null());
        assert_eq!(img, ImageRef::default());
        assert_eq!(img.to_string(), "image 0x0");
    }

    #[test]
    fn test_same_buffer_compares_addresses_only() {
        let pixels = [0u8; 16];
        let other = [0u8; 16];
        let a = ImageRef::new(pixels.as_ptr(), 4, 1, 4, 1);
        let b = ImageRef::new(pixels.as_ptr(), 2, 2, 8, 7);
        let c = ImageRef::new(other.as_ptr(), 4, 1, 4, 1);
        assert!(a.same_buffer(&b));
        assert!(!a.same_buffer(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_descriptor_copy_is_shallow() {
        let pixels = [1u8, 2, 3, 4];
        let a = ImageRef::new(pixels.as_ptr(), 2, 2, 2, 0);
        let b = a;
        assert!(a.same_buffer(&b));
        assert_eq!(a, b);
    }
}
