use std::collections::HashMap;
use std::sync::Arc;

use codec::{FrameSnapshot, FrameSnapshotManager, ObjectId, ObjectState, Tick, ZoneId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schema::{ClassDescriptor, ClassId, FieldDescriptor, FieldIndex, ParamType, ParamValue};

const OBJECTS: u32 = 256;

fn bench_class() -> Arc<ClassDescriptor> {
    Arc::new(
        ClassDescriptor::new(ClassId::new(1), "Mover")
            .field(FieldDescriptor::parameter("pos", ParamType::Vec3))
            .field(FieldDescriptor::parameter("vel", ParamType::Vec3))
            .field(FieldDescriptor::parameter("heading", ParamType::F32))
            .field(FieldDescriptor::parameter("hp", ParamType::U16))
            .field(FieldDescriptor::parameter("flags", ParamType::U8)),
    )
}

#[derive(Default, Clone)]
struct Fields(HashMap<FieldIndex, ParamValue>);

impl ObjectState for Fields {
    fn get_field(&self, index: FieldIndex) -> Option<ParamValue> {
        self.0.get(&index).cloned()
    }

    fn set_field(&mut self, index: FieldIndex, value: ParamValue) {
        self.0.insert(index, value);
    }
}

fn mover_state(seed: u32, t: f32) -> Fields {
    let mut fields = Fields::default();
    let base = seed as f32;
    fields.0.insert(0, ParamValue::Vec3([base + t, base, -base]));
    fields.0.insert(1, ParamValue::Vec3([t, 0.0, 0.0]));
    fields.0.insert(2, ParamValue::F32(t * 0.1));
    fields.0.insert(3, ParamValue::UInt(u64::from(seed % 100)));
    fields.0.insert(4, ParamValue::UInt(u64::from(seed % 4)));
    fields
}

fn build_snapshots() -> (FrameSnapshotManager, FrameSnapshot, FrameSnapshot) {
    let class = bench_class();
    let mut manager = FrameSnapshotManager::new();

    let mut snap1 = FrameSnapshot::with_capacity(Tick::new(1), OBJECTS as usize);
    for id in 0..OBJECTS {
        manager
            .pack_object_in_snapshot(
                &mut snap1,
                id as usize,
                &mover_state(id, 0.0),
                ObjectId::new(id),
                ZoneId::new(id % 4),
                &class,
            )
            .unwrap();
    }

    // A quarter of the population moves between ticks.
    let mut snap2 = FrameSnapshot::with_capacity(Tick::new(2), OBJECTS as usize);
    for id in 0..OBJECTS {
        let t = if id % 4 == 0 { 1.0 } else { 0.0 };
        manager
            .pack_object_in_snapshot(
                &mut snap2,
                id as usize,
                &mover_state(id, t),
                ObjectId::new(id),
                ZoneId::new(id % 4),
                &class,
            )
            .unwrap();
    }

    (manager, snap1, snap2)
}

fn bench_pack(c: &mut Criterion) {
    let class = bench_class();
    let states: Vec<Fields> = (0..OBJECTS).map(|id| mover_state(id, 0.0)).collect();

    c.bench_function("pack_256_objects", |b| {
        b.iter(|| {
            let mut manager = FrameSnapshotManager::new();
            let mut snapshot = FrameSnapshot::with_capacity(Tick::new(1), OBJECTS as usize);
            for (slot, state) in states.iter().enumerate() {
                manager
                    .pack_object_in_snapshot(
                        &mut snapshot,
                        slot,
                        state,
                        ObjectId::new(slot as u32),
                        ZoneId::new(0),
                        &class,
                    )
                    .unwrap();
            }
            black_box(snapshot.len())
        });
    });
}

fn bench_format_absolute(c: &mut Criterion) {
    let (manager, snap1, _) = build_snapshots();
    let zones: Vec<ZoneId> = (0..4).map(ZoneId::new).collect();
    let mut buf = vec![0u8; 64 * 1024];

    c.bench_function("format_absolute_256_objects", |b| {
        b.iter(|| {
            let len = manager
                .client_format_snapshot(&snap1, &zones, &mut buf)
                .unwrap();
            black_box(len)
        });
    });
}

fn bench_format_delta(c: &mut Criterion) {
    let (manager, snap1, snap2) = build_snapshots();
    let zones: Vec<ZoneId> = (0..4).map(ZoneId::new).collect();
    let mut buf = vec![0u8; 64 * 1024];

    c.bench_function("format_delta_quarter_changed", |b| {
        b.iter(|| {
            let len = manager
                .client_format_delta_snapshot(&snap1, &snap2, &zones, &mut buf)
                .unwrap();
            black_box(len)
        });
    });
}

criterion_group!(
    benches,
    bench_pack,
    bench_format_absolute,
    bench_format_delta
);
criterion_main!(benches);
