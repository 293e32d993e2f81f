//! Program fixtures shared by the integration tests

use pta_engine::{
    FieldRef, MethodId, MethodKind, MethodRef, Program, ProgramBuilder, Subsignature, TypeRef,
};

/// `A a = new A(); A b = a;`
pub fn aliasing() -> (Program, MethodId) {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main_cls = b.add_class("Main").unwrap();
    let main = {
        let mut m = b.add_method(main_cls, "main", &[], MethodKind::Static).unwrap();
        m.new_object("a", a).copy("b", "a").new_object("c", a);
        m.id()
    };
    b.set_entry(main);
    (b.build(), main)
}

/// A.foo() overridden by B and C; `x` only ever holds a B
pub struct Dispatch {
    pub program: Program,
    pub main: MethodId,
    pub a_foo: MethodId,
    pub b_foo: MethodId,
    pub c_foo: MethodId,
}

pub fn virtual_dispatch(with_c_object: bool) -> Dispatch {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object").unwrap();
    let a = b.add_class("A").unwrap();
    let bb = b.add_class("B").unwrap();
    let c = b.add_class("C").unwrap();
    let main_cls = b.add_class("Main").unwrap();
    b.extends(a, object).extends(bb, a).extends(c, a).extends(main_cls, object);

    let foo = Subsignature::new("foo", &[]);
    let a_foo = b.add_method(a, "foo", &[], MethodKind::Instance).unwrap().id();
    let b_foo = b.add_method(bb, "foo", &[], MethodKind::Instance).unwrap().id();
    let c_foo = b.add_method(c, "foo", &[], MethodKind::Instance).unwrap().id();
    let main = {
        let mut m = b.add_method(main_cls, "main", &[], MethodKind::Static).unwrap();
        m.new_object("x", bb);
        if with_c_object {
            m.new_object("y", c).copy("x", "y");
        }
        m.invoke_virtual(None, "x", MethodRef::new(a, foo), &[]);
        m.id()
    };
    b.set_entry(main);
    Dispatch {
        program: b.build(),
        main,
        a_foo,
        b_foo,
        c_foo,
    }
}

/// `T.f = y; z = T.f;`
pub fn static_field() -> (Program, MethodId) {
    let mut b = ProgramBuilder::new();
    let t = b.add_class("T").unwrap();
    b.add_field(t, "f", true).unwrap();
    let main = {
        let mut m = b.add_method(t, "main", &[], MethodKind::Static).unwrap();
        m.new_object("y", t)
            .store_static(FieldRef::new(t, "f"), "y")
            .load_static("z", FieldRef::new(t, "f"));
        m.id()
    };
    b.set_entry(main);
    (b.build(), main)
}

/// `dead()` allocates but is never called
pub fn unreachable() -> (Program, MethodId, MethodId) {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        m.new_object("x", a);
        m.id()
    };
    let dead = {
        let mut m = b.add_method(a, "dead", &[], MethodKind::Static).unwrap();
        m.new_object("y", a).copy("z", "y").invoke_static(
            None,
            MethodRef::new(a, Subsignature::new("main", &[])),
            &[],
        );
        m.id()
    };
    b.set_entry(main);
    (b.build(), main, dead)
}

/// Box with set/get through an instance field; two boxes, two payloads
pub fn boxes() -> (Program, MethodId) {
    let mut b = ProgramBuilder::new();
    let item = b.add_class("Item").unwrap();
    let bx = b.add_class("Box").unwrap();
    b.add_field(bx, "value", false).unwrap();
    let value = FieldRef::new(bx, "value");

    {
        let mut m = b.add_method(bx, "<init>", &[], MethodKind::Instance).unwrap();
        m.copy("self", "this");
    }
    {
        let mut m = b.add_method(bx, "set", &[("v", "Item")], MethodKind::Instance).unwrap();
        m.store_field("this", value.clone(), "v");
    }
    {
        let mut m = b.add_method(bx, "get", &[], MethodKind::Instance).unwrap();
        m.load_field("r", "this", value).returns("r");
    }

    let init = MethodRef::new(bx, Subsignature::new("<init>", &[]));
    let set = MethodRef::new(bx, Subsignature::new("set", &["Item"]));
    let get = MethodRef::new(bx, Subsignature::new("get", &[]));
    let main = {
        let mut m = b.add_method(item, "main", &[], MethodKind::Static).unwrap();
        m.new_object("b1", bx)
            .invoke_special(None, "b1", init.clone(), &[])
            .new_object("b2", bx)
            .invoke_special(None, "b2", init, &[])
            .new_object("i1", item)
            .new_object("i2", item)
            .invoke_virtual(None, "b1", set.clone(), &["i1"])
            .invoke_virtual(None, "b2", set, &["i2"])
            .invoke_virtual(Some("r1"), "b1", get.clone(), &[])
            .invoke_virtual(Some("r2"), "b2", get, &[]);
        m.id()
    };
    b.set_entry(main);
    (b.build(), main)
}

/// Interface call resolved to a default method and to an override
pub fn interfaces() -> (Program, MethodId, MethodId, MethodId) {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object").unwrap();
    let shape = b.add_interface("Shape").unwrap();
    let square = b.add_class("Square").unwrap();
    let circle = b.add_class("Circle").unwrap();
    b.extends(square, object).extends(circle, object);
    b.implements(square, shape).implements(circle, shape);

    let name = Subsignature::new("name", &[]);
    let default_name = {
        let mut m = b.add_method(shape, "name", &[], MethodKind::Instance).unwrap();
        m.returns("this");
        m.id()
    };
    let circle_name = b.add_method(circle, "name", &[], MethodKind::Instance).unwrap().id();

    let main = {
        let mut m = b.add_method(object, "main", &[], MethodKind::Static).unwrap();
        m.new_object("s", square)
            .new_object("c", circle)
            .invoke_interface(Some("n1"), "s", MethodRef::new(shape, name.clone()), &[])
            .invoke_interface(Some("n2"), "c", MethodRef::new(shape, name), &[]);
        m.id()
    };
    b.set_entry(main);
    (b.build(), main, default_name, circle_name)
}

/// Array element flow: `arr[0] = p; q = arr[1];`
pub fn arrays() -> (Program, MethodId) {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        m.new_array("arr", TypeRef::Class(a))
            .new_object("p", a)
            .store_array("arr", "p")
            .copy("alias", "arr")
            .load_array("q", "alias");
        m.id()
    };
    b.set_entry(main);
    (b.build(), main)
}
