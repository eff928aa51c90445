use serde::Deserialize;

/// The interface description of the token contract, checked in next to the
/// sources. The dashboard never introspects the JS contract object for its
/// callable members; everything it knows about the contract comes from here.
pub const TRC20_ABI: &str = include_str!("../abi/trc20.json");

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One declared entry of the interface description.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AbiEntry {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(default, rename = "stateMutability")]
    pub state_mutability: Option<String>,
    #[serde(default)]
    pub constant: Option<bool>,
}

impl AbiEntry {
    pub fn is_function(&self) -> bool {
        self.kind == "function"
    }

    /// Read calls only inspect state; `view`/`pure` entries and the legacy
    /// `constant` marker qualify.
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability.as_deref(), Some("view") | Some("pure"))
            || self.constant == Some(true)
    }

    pub fn takes_no_arguments(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAbi {
    entries: Vec<AbiEntry>,
}

impl TokenAbi {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self { entries: serde_json::from_str(json)? })
    }

    /// The embedded TRC20 interface description.
    pub fn trc20() -> Self {
        Self::parse(TRC20_ABI).expect("embedded TRC20 ABI is valid JSON")
    }

    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.entries.iter().filter(|e| e.is_function())
    }

    /// The declared read-only entry points, in declaration order.
    pub fn read_functions(&self) -> Vec<AbiEntry> {
        self.functions().filter(|e| e.is_read_only()).cloned().collect()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions().any(|e| e.name == name)
    }
}
