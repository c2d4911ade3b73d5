use crate::Error;
use crate::net::{ElementKind, Network, NetworkRecord};
use crate::topo::{TopologyShape, build_topology};

#[test]
fn record_carries_type_tags_and_references() {
    let net = build_topology("star", 2, "1:8").expect("build star");
    let v = serde_json::to_value(net.to_record()).expect("serialize");

    assert_eq!(v["shape"], "star");
    assert_eq!(v["olt"]["type"], "OLT");
    assert_eq!(v["olt"]["connected_splitters"][0], "SPLIT-1");
    assert_eq!(v["splitters"][0]["type"], "SPLITTER");
    assert_eq!(v["splitters"][0]["olt_id"], "OLT-1");
    assert_eq!(v["splitters"][0]["connected_onus"].as_array().map(Vec::len), Some(2));
    assert_eq!(v["onus"][1]["type"], "ONU");
    assert_eq!(v["onus"][1]["splitter_id"], "SPLIT-1");
    assert_eq!(v["fibers"][0]["type"], "FIBER");
    assert_eq!(v["fibers"][0]["from_element"]["type"], "OLT");
    assert_eq!(v["fibers"][0]["to_element"]["id"], "SPLIT-1");
}

#[test]
fn record_round_trip_preserves_network() {
    for shape in TopologyShape::ALL {
        let mut net = build_topology(shape.as_str(), 10, "1:4").expect("build");
        let first = net.onu_by_label("ONU-1").expect("ONU-1");
        net.set_traffic_rate(first, 20.0).expect("rate");

        let record = net.to_record();
        let rebuilt = Network::from_record(&record).expect("rebuild");
        assert_eq!(rebuilt.to_record(), record, "{shape} round trip differs");

        let raw = serde_json::to_string(&record).expect("serialize");
        let parsed: NetworkRecord = serde_json::from_str(&raw).expect("parse");
        let restored = Network::from_record(&parsed).expect("rebuild from json");
        assert_eq!(restored.onus().len(), net.onus().len());
        assert_eq!(restored.fibers().len(), net.fibers().len());
        assert_eq!(restored.splitters()[0].ratio(), net.splitters()[0].ratio());
        assert_eq!(restored.olt().map(|o| o.id.clone()), Some("OLT-1".to_string()));
        assert_eq!(restored.shape, shape);
    }
}

#[test]
fn legacy_topology_type_key_is_accepted() {
    let raw = r#"
    {
        "name": "legacy",
        "topology_type": "hexagon",
        "olt": null,
        "splitters": [],
        "onus": [],
        "fibers": []
    }
    "#;
    let rec: NetworkRecord = serde_json::from_str(raw).expect("parse");
    assert_eq!(rec.shape, TopologyShape::Star);
    let net = Network::from_record(&rec).expect("rebuild");
    assert!(net.olt().is_none());
}

#[test]
fn rebuild_rejects_dangling_references() {
    let net = build_topology("star", 2, "1:8").expect("build star");
    let mut rec = net.to_record();
    rec.fibers[1].to_element.id = "ONU-99".into();
    assert!(matches!(Network::from_record(&rec), Err(Error::UnknownElement(_))));

    let mut rec = net.to_record();
    rec.fibers[0].from_element.kind = ElementKind::Onu;
    assert!(Network::from_record(&rec).is_err());

    let mut rec = net.to_record();
    rec.onus[0].splitter_id = Some("SPLIT-404".into());
    rec.splitters[0].connected_onus.clear();
    assert!(Network::from_record(&rec).is_err());
}

#[test]
fn rebuild_rejects_onu_owned_by_two_splitters() {
    let net = build_topology("bus", 2, "1:32").expect("build bus");

    // ONU-1 同时出现在两个分接器下
    let mut rec = net.to_record();
    rec.onus[0].splitter_id = Some("SPLIT-TAP-2".into());
    rec.splitters[1].connected_onus.insert(0, "ONU-1".into());
    assert!(matches!(
        Network::from_record(&rec),
        Err(Error::InvalidArgument { name: "splitter", .. })
    ));

    // 只有 ONU 一侧指向别的分接器
    let mut rec = net.to_record();
    rec.onus[0].splitter_id = Some("SPLIT-TAP-2".into());
    assert!(matches!(
        Network::from_record(&rec),
        Err(Error::InvalidArgument { name: "splitter", .. })
    ));

    // 只在分接器一侧声明的关系仍会补全
    let mut rec = net.to_record();
    rec.onus[0].splitter_id = None;
    let rebuilt = Network::from_record(&rec).expect("rebuild");
    let onu = rebuilt.onu_by_label("ONU-1").expect("ONU-1");
    let tap = rebuilt.splitter_by_label("SPLIT-TAP-1").expect("tap");
    assert_eq!(rebuilt.onu(onu).splitter(), Some(tap));
    assert_eq!(rebuilt.splitter(tap).onus(), &[onu]);
}
