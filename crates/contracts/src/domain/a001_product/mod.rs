pub mod aggregate;

pub use aggregate::{
    NumericField, Product, ProductForm, ProductId, ProductListQuery, UpdateProductDto,
    ValidatedProduct,
};
