#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }

                /// Live snapshot of the whole collection.
                pub async fn [<watch_ $entity_name_snake s>](&self) -> Result<tokio::sync::watch::Receiver<Vec<$entity>>, $error> {
                    $crate::live::live_query(&self.inner, $crate::actor_framework::Query::all)
                        .await
                        .map_err(<$error>::from)
                }
            }
        }
    };
}
