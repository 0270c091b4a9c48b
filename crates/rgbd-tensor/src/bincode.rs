use crate::{
    allocator::CpuAllocator,
    dtype::SafeTensorType,
    storage::TensorStorage,
    tensor::{checked_numel, get_strides_from_shape, TensorError},
    Tensor,
};

impl<T, const N: usize> bincode::enc::Encode for Tensor<T, N, CpuAllocator>
where
    T: SafeTensorType + bincode::enc::Encode,
{
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.shape, encoder)?;
        bincode::Encode::encode(&self.strides, encoder)?;
        bincode::Encode::encode(self.as_slice(), encoder)?;
        Ok(())
    }
}

impl<T, const N: usize, C> bincode::de::Decode<C> for Tensor<T, N, CpuAllocator>
where
    T: SafeTensorType + bincode::de::Decode<C>,
{
    fn decode<D: bincode::de::Decoder<Context = C>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let shape: [usize; N] = bincode::Decode::decode(decoder)?;
        let strides: [usize; N] = bincode::Decode::decode(decoder)?;
        let data: Vec<T> = bincode::Decode::decode(decoder)?;

        let numel = checked_numel(shape).ok_or_else(|| {
            let err = TensorError::ShapeOverflow(shape.to_vec());
            bincode::error::DecodeError::OtherString(err.to_string())
        })?;
        if numel != data.len() {
            let err = TensorError::invalid_shape(numel, data.len());
            return Err(bincode::error::DecodeError::OtherString(err.to_string()));
        }

        // storage is always contiguous row-major
        if strides != get_strides_from_shape(shape) {
            return Err(bincode::error::DecodeError::OtherString(format!(
                "Strides {strides:?} do not match a contiguous row-major layout for shape {shape:?}"
            )));
        }

        Ok(Self {
            storage: TensorStorage::from_vec(data, CpuAllocator),
            shape,
            strides,
        })
    }
}
