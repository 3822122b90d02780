use std::borrow::Cow;

use bon::Builder;

/// Options for tagging an image with a new reference.
#[derive(Debug, Clone, Builder)]
pub struct TagOpts<'scope> {
    /// The image produced by the build.
    #[builder(into)]
    pub src_image: Cow<'scope, str>,

    /// The reference to apply.
    #[builder(into)]
    pub dest_image: Cow<'scope, str>,
}

/// Options for pushing a tagged image.
#[derive(Debug, Clone, Builder)]
pub struct PushOpts<'scope> {
    #[builder(into)]
    pub image: Cow<'scope, str>,
}
