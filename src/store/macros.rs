/// 在加载时把存储后端注册进插件表
///
/// 后端类型需要提供 `async fn from_config(&StoreConfig) -> Result<Self>`。
#[macro_export]
macro_rules! declare_store_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        fn __register_store_plugin() {
            use std::sync::Arc;
            use $crate::store::register::{BoxedStoreFuture, register_store_plugin};

            register_store_plugin(
                $name,
                Arc::new(
                    |config: $crate::config::StoreConfig| -> BoxedStoreFuture {
                        Box::pin(async move {
                            let store = <$ty>::from_config(&config).await?;
                            Ok(Arc::new(store)
                                as Arc<dyn $crate::store::SortedAggregateStore>)
                        })
                    },
                ),
            );
        }
    };
}
