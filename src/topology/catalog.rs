//! Static element taxonomy and function metadata
//!
//! Every generation has a fixed, ordered set of element types. Topology
//! generation walks these lists in order, and every (generation, element
//! type) pair has a fixed description of what the element does.

use crate::types::{ElementType, NetworkType};

const GSM_ELEMENTS: &[ElementType] = &[
    ElementType::Bsc,
    ElementType::Bts,
    ElementType::Msc,
    ElementType::Smsc,
    ElementType::Hlr,
];

const UMTS_ELEMENTS: &[ElementType] = &[
    ElementType::Sgsn,
    ElementType::Ggsn,
    ElementType::Msc,
    ElementType::Hss,
    ElementType::Rnc,
    ElementType::NodeB,
];

const LTE_ELEMENTS: &[ElementType] = &[
    ElementType::Mme,
    ElementType::Sgw,
    ElementType::Pgw,
    ElementType::Hss,
    ElementType::ENodeB,
    ElementType::Pcrf,
];

const NR_ELEMENTS: &[ElementType] = &[
    ElementType::Amf,
    ElementType::Smf,
    ElementType::Upf,
    ElementType::Nssf,
    ElementType::Pcf,
    ElementType::Udm,
    ElementType::GNodeB,
    ElementType::Cu,
    ElementType::Du,
];

/// Element types of a generation, in generation order
pub fn taxonomy(network_type: NetworkType) -> &'static [ElementType] {
    match network_type {
        NetworkType::Gsm => GSM_ELEMENTS,
        NetworkType::Umts => UMTS_ELEMENTS,
        NetworkType::Lte => LTE_ELEMENTS,
        NetworkType::Nr => NR_ELEMENTS,
    }
}

/// Whether the element type belongs to the generation's taxonomy
pub fn is_in_taxonomy(network_type: NetworkType, element_type: ElementType) -> bool {
    taxonomy(network_type).contains(&element_type)
}

/// What an element of this type does in this generation
pub fn function_description(
    network_type: NetworkType,
    element_type: ElementType,
) -> Option<&'static str> {
    use ElementType::*;
    use NetworkType::*;

    let description = match (network_type, element_type) {
        (Gsm, Bsc) => "Controls BTS, radio resource management.",
        (Gsm, Bts) => "Handles radio communication with mobile devices.",
        (Gsm, Msc) => "Manages voice call routing and switching.",
        (Gsm, Smsc) => "Handles SMS messaging gateway.",
        (Gsm, Hlr) => "Database for subscriber information.",
        (Umts, Sgsn) => "Handles mobile packet switched data.",
        (Umts, Ggsn) => "Gateway for packet-switched data.",
        (Umts, Msc) => "Voice call routing and switching.",
        (Umts, Hss) => "Manages user profiles and authentication.",
        (Umts, Rnc) => "Manages NodeBs in the network.",
        (Umts, NodeB) => "3G base stations, similar to BTS.",
        (Lte, Mme) => "Mobility management in LTE networks.",
        (Lte, Sgw) => "Gateway for radio access to core network.",
        (Lte, Pgw) => "Packet gateway for external networks.",
        (Lte, Hss) => "Manages user profiles and authentication.",
        (Lte, ENodeB) => "4G base stations.",
        (Lte, Pcrf) => "Policy control and charging rules.",
        (Nr, Amf) => "Handles UE registration and mobility.",
        (Nr, Smf) => "Manages session establishment.",
        (Nr, Upf) => "Routes user data and provides bearer control.",
        (Nr, Nssf) => "Determines network slice for services.",
        (Nr, Pcf) => "Policy management for user traffic.",
        (Nr, Udm) => "Manages subscriber data.",
        (Nr, GNodeB) => "5G base station.",
        (Nr, Cu) => "Handles control in 5G RAN.",
        (Nr, Du) => "Handles lower layers in 5G RAN.",
        _ => return None,
    };
    Some(description)
}
