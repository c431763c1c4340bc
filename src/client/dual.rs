use std::marker::PhantomData;

use crate::client::{UnipileClient, UnipileError};
use crate::domain::RequestOptions;
use crate::transport::{DualAddressed, DualOutput};

/// One logical operation reachable by Unipile id or by provider id.
///
/// [`DualAddress::call`] is the primary entry point and behaves exactly like
/// [`DualAddress::by_id`]. [`DualAddress::by_provider_id`] takes a provider-native id
/// together with its account scope.
///
/// ```rust,no_run
/// # async fn run(client: unipile::UnipileClient) -> Result<(), unipile::UnipileError> {
/// use unipile::{AccountId, EmailId, EmailProviderId, ProviderAddress, RequestOptions};
///
/// let options = RequestOptions::default();
/// let mail = client.email().get_one().call(&EmailId::new("email_id")?, &options).await?;
/// let same = client
///     .email()
///     .get_one()
///     .by_provider_id(
///         &ProviderAddress::new(EmailProviderId::new("prov123")?, AccountId::new("acct1")?),
///         &options,
///     )
///     .await?;
/// # let _ = (mail, same);
/// # Ok(())
/// # }
/// ```
pub struct DualAddress<'a, Op> {
    client: &'a UnipileClient,
    op: PhantomData<fn() -> Op>,
}

impl<'a, Op: DualAddressed> DualAddress<'a, Op> {
    pub(crate) fn new(client: &'a UnipileClient) -> Self {
        Self {
            client,
            op: PhantomData,
        }
    }

    /// Primary entry point; same request as [`DualAddress::by_id`].
    pub async fn call(
        &self,
        input: &Op::ById,
        options: &RequestOptions,
    ) -> Result<DualOutput<Op>, UnipileError> {
        self.by_id(input, options).await
    }

    pub async fn by_id(
        &self,
        input: &Op::ById,
        options: &RequestOptions,
    ) -> Result<DualOutput<Op>, UnipileError> {
        self.client.send(Op::by_id(input, options)).await
    }

    /// Address the resource by provider id. A bare provider id is rejected at compile
    /// time; it must be wrapped in a [`ProviderAddress`](crate::ProviderAddress) with
    /// its account:
    ///
    /// ```compile_fail
    /// # async fn run(client: unipile::UnipileClient) -> Result<(), unipile::UnipileError> {
    /// use unipile::{EmailProviderId, RequestOptions};
    ///
    /// let provider_id = EmailProviderId::new("prov123")?;
    /// client
    ///     .email()
    ///     .get_one()
    ///     .by_provider_id(&provider_id, &RequestOptions::default())
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn by_provider_id(
        &self,
        input: &Op::ByProviderId,
        options: &RequestOptions,
    ) -> Result<DualOutput<Op>, UnipileError> {
        self.client.send(Op::by_provider_id(input, options)).await
    }
}
