//! # Remote Images
//!
//! Image properties may point at a URL. Fetching one is the only asynchronous
//! step of styling: the engine hands the URL to [RemoteImages], which runs the
//! fetch on smol's executor and queues the result. The UI thread later drains the
//! queue with [RemoteImages::drain_into], delivering every image to the component
//! that asked for it.
//!
//! Fetches are never cancelled. When a later styling pass asks for another image
//! while an older fetch is still running, both complete and the one delivered last
//! wins.

use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use smol::channel::{Receiver, Sender};

use crate::styleable::{with_component, ComponentId, Styleable};

/// Error returned by an [ImageFetcher].
pub type FetchError = Box<dyn Error + Send + Sync>;

/// Downloads images.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the raw bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// A downloaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// The URL it was fetched from.
    pub url: String,
    /// The undecoded image data.
    pub bytes: Arc<[u8]>,
}

/// A finished fetch waiting to be delivered.
#[derive(Debug)]
pub struct ImageDelivery {
    /// The component that requested the image.
    pub component: ComponentId,
    /// The property the image is for.
    pub key: String,
    /// The image, or why it could not be fetched.
    pub result: Result<FetchedImage, String>,
}

/// Dispatches image fetches and collects their results.
#[derive(Clone)]
pub struct RemoteImages {
    fetcher: Arc<dyn ImageFetcher>,
    sender: Sender<ImageDelivery>,
    receiver: Receiver<ImageDelivery>,
}

impl RemoteImages {
    /// Create a dispatcher using `fetcher`.
    pub fn new(fetcher: impl ImageFetcher + 'static) -> Self {
        let (sender, receiver) = smol::channel::unbounded();
        Self {
            fetcher: Arc::new(fetcher),
            sender,
            receiver,
        }
    }

    /// Start fetching `url` for the property `key` of `component`.
    pub fn request(&self, component: ComponentId, key: &str, url: &str) {
        log::debug!("Fetching {} for '{}' of {}", url, key, component);

        let fetcher = self.fetcher.clone();
        let sender = self.sender.clone();
        let key = key.to_string();
        let url = url.to_string();
        smol::spawn(async move {
            let result = match fetcher.fetch(&url).await {
                Ok(bytes) => Ok(FetchedImage {
                    url,
                    bytes: bytes.into(),
                }),
                Err(e) => Err(format!("{url}: {e}")),
            };
            let delivery = ImageDelivery {
                component,
                key,
                result,
            };
            if sender.send(delivery).await.is_err() {
                log::debug!("Image fetched after its dispatcher was dropped");
            }
        })
        .detach();
    }

    /// Deliver every finished fetch to its component below `root`.
    ///
    /// Returns the number of images delivered.
    pub fn drain_into(&self, root: &mut dyn Styleable) -> usize {
        let mut delivered = 0;
        while let Ok(delivery) = self.receiver.try_recv() {
            if deliver(delivery, root) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Wait for the next finished fetch.
    pub async fn next(&self) -> Option<ImageDelivery> {
        self.receiver.recv().await.ok()
    }

    /// Number of finished fetches not delivered yet.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Debug for RemoteImages {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteImages")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Deliver one finished fetch to its component below `root`.
///
/// Returns whether the image reached a component that accepted it.
pub fn deliver(delivery: ImageDelivery, root: &mut dyn Styleable) -> bool {
    let image = match delivery.result {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Failed to fetch image for '{}': {}", delivery.key, e);
            return false;
        },
    };

    match with_component(root, delivery.component, |node| node.receive_image(&delivery.key, &image)) {
        Some(accepted) => accepted,
        None => {
            log::debug!("{} is gone, dropping image {}", delivery.component, image.url);
            false
        },
    }
}
