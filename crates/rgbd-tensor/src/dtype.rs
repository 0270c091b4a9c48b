/// Element type of a tensor, known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl Dtype {
    /// Size in bytes of one element of this type.
    pub fn byte_size(&self) -> usize {
        match self {
            Dtype::UInt8 | Dtype::Int8 => 1,
            Dtype::UInt16 | Dtype::Int16 => 2,
            Dtype::UInt32 | Dtype::Int32 | Dtype::Float32 => 4,
            Dtype::UInt64 | Dtype::Int64 | Dtype::Float64 => 8,
        }
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dtype::UInt8 => "UInt8",
            Dtype::UInt16 => "UInt16",
            Dtype::UInt32 => "UInt32",
            Dtype::UInt64 => "UInt64",
            Dtype::Int8 => "Int8",
            Dtype::Int16 => "Int16",
            Dtype::Int32 => "Int32",
            Dtype::Int64 => "Int64",
            Dtype::Float32 => "Float32",
            Dtype::Float64 => "Float64",
        };
        write!(f, "{name}")
    }
}

/// A trait to define the types that can be stored in a tensor.
///
/// The element types are plain numeric values so that the storage can hand out
/// raw bytes and deep copies without running destructors.
pub trait SafeTensorType: Copy + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Runtime tag of the element type.
    const DTYPE: Dtype;

    /// Native-endian byte representation of the value.
    fn append_ne_bytes(&self, out: &mut Vec<u8>);
}

macro_rules! impl_safe_tensor_type {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl SafeTensorType for $ty {
                const DTYPE: Dtype = Dtype::$dtype;

                #[inline]
                fn append_ne_bytes(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_safe_tensor_type!(
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
);
