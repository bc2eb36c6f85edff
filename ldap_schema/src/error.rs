// AttributeNotFound

#[derive(Debug)]
pub struct AttributeNotFound {
    name: String,
}

impl AttributeNotFound {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for AttributeNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Attribute type not found: '{}'", self.name)
    }
}

impl std::error::Error for AttributeNotFound {}

// ObjectClassNotFound

#[derive(Debug)]
pub struct ObjectClassNotFound {
    name: String,
}

impl ObjectClassNotFound {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ObjectClassNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object class not found: '{}'", self.name)
    }
}

impl std::error::Error for ObjectClassNotFound {}

// InvalidGeneralizedTime

#[derive(Debug)]
pub struct InvalidGeneralizedTime {
    value: String,
    message: String,
}

impl InvalidGeneralizedTime {
    pub(crate) fn new(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for InvalidGeneralizedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid generalized time '{}': {}",
            self.value, self.message
        )
    }
}

impl std::error::Error for InvalidGeneralizedTime {}
