#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub interactive: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            visible: true,
            interactive: true,
        }
    }
}
