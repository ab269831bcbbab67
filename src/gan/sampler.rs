//! Draw synthetic flows from a generator

use ndarray::Array2;
use rand::Rng;

use super::generator::Generator;
use super::latent::LatentCode;
use crate::codec::FlowCodec;
use crate::dataset::FlowRecord;
use crate::error::Result;
use crate::export::SampleSink;

/// Generate `count` vectors and decode them into records
pub fn sample<R: Rng>(generator: &Generator, codec: &FlowCodec, count: usize, rng: &mut R) -> Result<Vec<FlowRecord>> {
    let mut batch = Array2::zeros((count, generator.output_width()));
    for mut row in batch.rows_mut() {
        let z = LatentCode::sample(rng, generator.config.latent_dim);
        row.assign(&generator.generate(&z, rng));
    }
    codec.decode_batch(batch.view())
}

/// Sample `count` records and hand them to the sink under `epoch`
///
/// Returns the number of records written.
pub fn export<R: Rng>(
    generator: &Generator,
    codec: &FlowCodec,
    count: usize,
    epoch: usize,
    sink: &mut dyn SampleSink,
    rng: &mut R,
) -> Result<usize> {
    let records = sample(generator, codec, count, rng)?;
    sink.write_samples(epoch, &records)?;
    Ok(records.len())
}
