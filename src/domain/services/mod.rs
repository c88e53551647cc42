mod text_normalizer;

pub use text_normalizer::TextNormalizer;
