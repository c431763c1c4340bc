use crate::domain::RequestOptions;
use crate::transport::descriptor::RequestDescriptor;
use crate::transport::validator::ResponseValidator;

/// An operation reachable both by Unipile id and by provider-native id.
///
/// Each implementation is one row of a dispatch table: two request constructors
/// sharing a validator and a path template, differing only in which identifier fills
/// the path and whether an account scope is attached.
pub trait DualAddressed {
    /// Input when addressing by Unipile id.
    type ById;
    /// Input when addressing by provider id; always carries an account scope.
    type ByProviderId;
    type Validator: ResponseValidator;

    fn by_id(input: &Self::ById, options: &RequestOptions) -> RequestDescriptor<Self::Validator>;

    fn by_provider_id(
        input: &Self::ByProviderId,
        options: &RequestOptions,
    ) -> RequestDescriptor<Self::Validator>;
}

/// Typed result of a dual-addressed operation.
pub type DualOutput<Op> = <<Op as DualAddressed>::Validator as ResponseValidator>::Output;
